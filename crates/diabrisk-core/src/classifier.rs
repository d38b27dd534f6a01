//! The risk classifier: validation, scaling, and model invocation.
//!
//! Every call runs the same fixed pipeline:
//!
//!   Validate → Resolve model → Scale → predict_with_probability
//!
//! A model is never invoked for a record that failed validation or for a
//! model name that did not resolve. Failures are returned as-is; nothing here
//! retries.

use chrono::Utc;
use tracing::{debug, info, warn};

use diabrisk_contracts::{
    error::{DiabriskError, DiabriskResult},
    model::ModelKind,
    patient::PatientRecord,
    prediction::{Assessment, AssessmentId, PredictionResult},
};

use crate::{scaler::FeatureScaler, traits::ModelSource, validate::validate_record};

/// Orchestrates one classification per call against a shared model source.
///
/// Holds no mutable state, so a single instance can serve any number of
/// sequential or concurrent calls.
pub struct RiskClassifier<'a> {
    scaler: FeatureScaler,
    models: &'a dyn ModelSource,
}

impl<'a> RiskClassifier<'a> {
    pub fn new(scaler: FeatureScaler, models: &'a dyn ModelSource) -> Self {
        Self { scaler, models }
    }

    /// A classifier using the standard scaling constants.
    pub fn with_standard_scaling(models: &'a dyn ModelSource) -> Self {
        Self::new(FeatureScaler::standard(), models)
    }

    /// The scaler this classifier applies.
    pub fn scaler(&self) -> &FeatureScaler {
        &self.scaler
    }

    /// Classify `record` with the model named `model_name`.
    ///
    /// # Errors
    ///
    /// - `Validation` if any attribute is outside its domain
    /// - `UnknownModel` if `model_name` is not one of the three model names
    /// - `Inference` if the model cannot evaluate the scaled features or
    ///   returns a probability outside [0, 1]
    pub fn classify(
        &self,
        record: &PatientRecord,
        model_name: &str,
    ) -> DiabriskResult<PredictionResult> {
        let kind = self.resolve(record, model_name)?;
        self.classify_with(record, kind)
    }

    /// Classify and wrap the result for presentation.
    pub fn assess(&self, record: &PatientRecord, model_name: &str) -> DiabriskResult<Assessment> {
        let kind = self.resolve(record, model_name)?;
        let result = self.classify_with(record, kind)?;
        Ok(Assessment {
            id: AssessmentId::new(),
            model: kind,
            record: record.clone(),
            result,
            tier: result.tier(),
            assessed_at: Utc::now(),
        })
    }

    /// Run `record` through every model, in `ModelKind::ALL` order.
    pub fn assess_all(&self, record: &PatientRecord) -> DiabriskResult<Vec<Assessment>> {
        ModelKind::ALL
            .into_iter()
            .map(|kind| self.assess(record, kind.name()))
            .collect()
    }

    /// Validate the record, then resolve the model name.
    fn resolve(&self, record: &PatientRecord, model_name: &str) -> DiabriskResult<ModelKind> {
        validate_record(record)?;
        model_name.parse::<ModelKind>().map_err(|e| {
            warn!(model = %model_name, "unknown model requested");
            e
        })
    }

    fn classify_with(
        &self,
        record: &PatientRecord,
        kind: ModelKind,
    ) -> DiabriskResult<PredictionResult> {
        let predictor = self.models.predictor(kind);

        let scaled = self.scaler.apply(record);
        debug!(model = %kind, features = ?scaled.as_slice(), "scaled patient record");

        let (label, probability) = predictor.predict_with_probability(&scaled)?;

        if !(0.0..=1.0).contains(&probability) {
            return Err(DiabriskError::Inference {
                reason: format!("model {} returned probability {} outside [0, 1]", kind, probability),
            });
        }
        if label > 1 {
            return Err(DiabriskError::Inference {
                reason: format!("model {} returned label {} (expected 0 or 1)", kind, label),
            });
        }

        info!(model = %kind, label, probability, "classification complete");

        Ok(PredictionResult { label, probability })
    }
}

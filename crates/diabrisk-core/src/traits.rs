//! Trait seams between the classifier and the models it drives.
//!
//! - `Predictor`:   one loaded classifier (opaque to the runtime)
//! - `ModelSource`: the read-only collection of predictors, keyed by kind
//!
//! The classifier only ever sees these traits; concrete artifact formats
//! live in `diabrisk-models`.

use diabrisk_contracts::{
    error::{DiabriskError, DiabriskResult},
    model::ModelKind,
    patient::ScaledRecord,
};

/// Probability above which `predict` returns the positive label.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// A trained binary classifier over scaled patient features.
///
/// Implementations are loaded once and never mutated, so they must be
/// shareable across threads.
pub trait Predictor: Send + Sync {
    /// Probability of the positive (at-risk) class, in [0, 1].
    fn predict_probability(&self, features: &ScaledRecord) -> DiabriskResult<f64>;

    /// Predicted class label, 0 or 1.
    ///
    /// The default thresholds the probability at `DECISION_THRESHOLD`,
    /// with ties going to the negative class.
    fn predict(&self, features: &ScaledRecord) -> DiabriskResult<u8> {
        let probability = self.predict_probability(features)?;
        Ok(u8::from(probability > DECISION_THRESHOLD))
    }

    /// Label and probability from a single evaluation, as `(label, probability)`.
    ///
    /// The default derives the label from the probability the same way
    /// `predict` does. Implementations that override `predict` must override
    /// this too.
    fn predict_with_probability(&self, features: &ScaledRecord) -> DiabriskResult<(u8, f64)> {
        let probability = self.predict_probability(features)?;
        Ok((u8::from(probability > DECISION_THRESHOLD), probability))
    }
}

/// Read-only access to the loaded predictors.
pub trait ModelSource: Send + Sync {
    /// The predictor for `kind`. Every kind is always present.
    fn predictor(&self, kind: ModelKind) -> &dyn Predictor;
}

/// Reject feature vectors a model cannot evaluate.
///
/// Returns `DiabriskError::Inference` naming the first non-finite feature.
pub fn check_features(features: &ScaledRecord) -> DiabriskResult<()> {
    match features.as_slice().iter().position(|v| !v.is_finite()) {
        Some(idx) => Err(DiabriskError::Inference {
            reason: format!("feature {} is not finite ({})", idx, features.as_slice()[idx]),
        }),
        None => Ok(()),
    }
}

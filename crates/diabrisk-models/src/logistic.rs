//! Logistic regression artifact.

use serde::{Deserialize, Serialize};

use diabrisk_contracts::{
    error::{DiabriskError, DiabriskResult},
    patient::{ScaledRecord, FEATURE_COUNT},
};
use diabrisk_core::traits::{check_features, Predictor};

use crate::artifact::{check_feature_names, sigmoid};

/// A linear model over the scaled features:
/// `p = sigmoid(intercept + Σ coefficients[i] · x[i])`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegressionModel {
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LogisticRegressionModel {
    pub fn validate(&self) -> Result<(), String> {
        check_feature_names(&self.feature_names)?;
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(format!(
                "expected {} coefficients, found {}",
                FEATURE_COUNT,
                self.coefficients.len()
            ));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err("coefficients and intercept must be finite".to_string());
        }
        Ok(())
    }

    /// The linear predictor before the sigmoid.
    ///
    /// Assumes one coefficient per feature; `predict_probability` checks this.
    pub fn decision_function(&self, features: &ScaledRecord) -> f64 {
        self.coefficients
            .iter()
            .zip(features.as_slice())
            .fold(self.intercept, |acc, (c, x)| acc + c * x)
    }
}

impl Predictor for LogisticRegressionModel {
    fn predict_probability(&self, features: &ScaledRecord) -> DiabriskResult<f64> {
        check_features(features)?;
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(DiabriskError::Inference {
                reason: format!(
                    "logistic regression has {} coefficients for {} features",
                    self.coefficients.len(),
                    FEATURE_COUNT
                ),
            });
        }
        Ok(sigmoid(self.decision_function(features)))
    }
}

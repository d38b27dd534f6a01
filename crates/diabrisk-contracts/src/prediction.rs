//! Prediction results, risk tiers, and the assessments built from them.
//!
//! `PredictionResult` is what the classifier returns for one call.
//! `Assessment` wraps it with everything a presenter needs to render it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{model::ModelKind, patient::PatientRecord};

/// Probabilities strictly above this are high risk.
pub const HIGH_RISK_THRESHOLD: f64 = 0.6;

/// Probabilities strictly above this (and not high) are moderate risk.
pub const MODERATE_RISK_THRESHOLD: f64 = 0.3;

/// Output of a single classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Predicted class: 1 = at risk of diabetes, 0 = not at risk.
    pub label: u8,
    /// Probability of the positive (at-risk) class, in [0, 1].
    pub probability: f64,
}

impl PredictionResult {
    pub fn tier(&self) -> RiskTier {
        RiskTier::from_probability(self.probability)
    }
}

/// Coarse risk band derived from the positive-class probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    /// Both comparisons are strict: exactly 0.6 is moderate, exactly 0.3 is low.
    pub fn from_probability(probability: f64) -> Self {
        if probability > HIGH_RISK_THRESHOLD {
            RiskTier::High
        } else if probability > MODERATE_RISK_THRESHOLD {
            RiskTier::Moderate
        } else {
            RiskTier::Low
        }
    }

    /// Advice shown alongside the probability.
    pub fn message(self) -> &'static str {
        match self {
            RiskTier::High => {
                "High risk of diabetes. A medical review and clinical follow-up are recommended."
            }
            RiskTier::Moderate => "Moderate risk. Keep healthy habits and schedule regular check-ups.",
            RiskTier::Low => "Low risk. Maintain a healthy lifestyle.",
        }
    }

    /// Gauge color name.
    pub fn color(self) -> &'static str {
        match self {
            RiskTier::High => "red",
            RiskTier::Moderate => "orange",
            RiskTier::Low => "green",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskTier::Low => write!(f, "low"),
            RiskTier::Moderate => write!(f, "moderate"),
            RiskTier::High => write!(f, "high"),
        }
    }
}

/// Unique identifier for one assessment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssessmentId(pub uuid::Uuid);

impl AssessmentId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for AssessmentId {
    fn default() -> Self {
        Self::new()
    }
}

/// A classification together with its inputs, ready for presentation.
///
/// Created fresh per call and never persisted by the runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub id: AssessmentId,
    /// Which model produced the result.
    pub model: ModelKind,
    /// The raw (unscaled) record that was classified.
    pub record: PatientRecord,
    pub result: PredictionResult,
    pub tier: RiskTier,
    /// Wall-clock time the assessment was made (UTC).
    pub assessed_at: DateTime<Utc>,
}

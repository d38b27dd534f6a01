//! Patient attributes and the records built from them.
//!
//! `PatientRecord` holds raw clinical measurements exactly as entered.
//! `ScaledRecord` holds the same attributes after feature scaling, laid out in
//! the canonical order every model artifact consumes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of features a model consumes.
pub const FEATURE_COUNT: usize = 6;

/// One named clinical attribute of a patient.
///
/// The declaration order is the canonical feature order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Age,
    FamilyHistoryOfDiabetes,
    FastingGlucose,
    PostprandialGlucose,
    GlycatedHemoglobin,
    DiabetesRiskScore,
}

impl Attribute {
    /// All attributes in canonical feature order.
    pub const ALL: [Attribute; FEATURE_COUNT] = [
        Attribute::Age,
        Attribute::FamilyHistoryOfDiabetes,
        Attribute::FastingGlucose,
        Attribute::PostprandialGlucose,
        Attribute::GlycatedHemoglobin,
        Attribute::DiabetesRiskScore,
    ];

    /// The five attributes measured on a continuous scale.
    pub const NUMERIC: [Attribute; 5] = [
        Attribute::Age,
        Attribute::FastingGlucose,
        Attribute::PostprandialGlucose,
        Attribute::GlycatedHemoglobin,
        Attribute::DiabetesRiskScore,
    ];

    /// Stable snake_case name, as used in artifact `feature_names`.
    pub fn name(self) -> &'static str {
        match self {
            Attribute::Age => "age",
            Attribute::FamilyHistoryOfDiabetes => "family_history_of_diabetes",
            Attribute::FastingGlucose => "fasting_glucose",
            Attribute::PostprandialGlucose => "postprandial_glucose",
            Attribute::GlycatedHemoglobin => "glycated_hemoglobin",
            Attribute::DiabetesRiskScore => "diabetes_risk_score",
        }
    }

    /// Human-readable label for terminal output.
    pub fn label(self) -> &'static str {
        match self {
            Attribute::Age => "Age",
            Attribute::FamilyHistoryOfDiabetes => "Family history of diabetes",
            Attribute::FastingGlucose => "Fasting glucose",
            Attribute::PostprandialGlucose => "Postprandial glucose",
            Attribute::GlycatedHemoglobin => "HbA1c",
            Attribute::DiabetesRiskScore => "Diabetes risk score",
        }
    }

    /// Position of this attribute in a feature vector.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inclusive `(min, max)` domain for numeric attributes.
    ///
    /// Returns `None` for the binary family-history flag, whose type already
    /// restricts it to {0, 1}.
    pub fn domain(self) -> Option<(f64, f64)> {
        match self {
            Attribute::Age => Some((19.0, 90.0)),
            Attribute::FamilyHistoryOfDiabetes => None,
            Attribute::FastingGlucose => Some((75.0, 147.0)),
            Attribute::PostprandialGlucose => Some((76.0, 244.0)),
            Attribute::GlycatedHemoglobin => Some((4.32, 8.72)),
            Attribute::DiabetesRiskScore => Some((6.1, 53.3)),
        }
    }

    /// Dataset average shown next to the patient's value in comparisons.
    pub fn population_average(self) -> Option<f64> {
        match self {
            Attribute::Age => Some(50.19),
            Attribute::FamilyHistoryOfDiabetes => None,
            Attribute::FastingGlucose => Some(111.12),
            Attribute::PostprandialGlucose => Some(160.0),
            Attribute::GlycatedHemoglobin => Some(6.52),
            Attribute::DiabetesRiskScore => Some(30.20),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw clinical measurements for one patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Age in years.
    pub age: f64,
    /// Whether a first-degree relative has diabetes.
    pub family_history_of_diabetes: bool,
    /// Fasting plasma glucose, mg/dL.
    pub fasting_glucose: f64,
    /// Two-hour postprandial glucose, mg/dL.
    pub postprandial_glucose: f64,
    /// Glycated hemoglobin (HbA1c), percent.
    pub glycated_hemoglobin: f64,
    /// Composite diabetes risk score.
    pub diabetes_risk_score: f64,
}

impl PatientRecord {
    /// Raw value of `attribute`, with the family-history flag as 0.0 / 1.0.
    pub fn value(&self, attribute: Attribute) -> f64 {
        match attribute {
            Attribute::Age => self.age,
            Attribute::FamilyHistoryOfDiabetes => {
                if self.family_history_of_diabetes {
                    1.0
                } else {
                    0.0
                }
            }
            Attribute::FastingGlucose => self.fasting_glucose,
            Attribute::PostprandialGlucose => self.postprandial_glucose,
            Attribute::GlycatedHemoglobin => self.glycated_hemoglobin,
            Attribute::DiabetesRiskScore => self.diabetes_risk_score,
        }
    }
}

impl Default for PatientRecord {
    /// The values a fresh intake form starts with.
    fn default() -> Self {
        Self {
            age: 50.0,
            family_history_of_diabetes: false,
            fasting_glucose: 111.0,
            postprandial_glucose: 160.0,
            glycated_hemoglobin: 6.52,
            diabetes_risk_score: 30.2,
        }
    }
}

/// A patient record after feature scaling, in canonical feature order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaledRecord {
    values: [f64; FEATURE_COUNT],
}

impl ScaledRecord {
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    /// Scaled value of `attribute`.
    pub fn get(&self, attribute: Attribute) -> f64 {
        self.values[attribute.index()]
    }

    /// The feature vector handed to a model.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

//! Fixed feature scaling applied before every model invocation.
//!
//! Three glucose markers are min-max normalized, age and the composite risk
//! score are standardized, and the family-history flag passes through. The
//! constants are the ones the shipped models were trained against; changing
//! them silently invalidates every artifact.

use diabrisk_contracts::{
    error::{DiabriskError, DiabriskResult},
    patient::{Attribute, PatientRecord, ScaledRecord, FEATURE_COUNT},
};

/// `(min, max)` bounds for min-max normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMaxRange {
    pub min: f64,
    pub max: f64,
}

/// `(mean, stddev)` for z-score standardization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Standardization {
    pub mean: f64,
    pub stddev: f64,
}

/// The two constant tables a `FeatureScaler` is built from.
///
/// Attributes appearing in neither table are copied unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalingParameters {
    pub min_max: Vec<(Attribute, MinMaxRange)>,
    pub standardization: Vec<(Attribute, Standardization)>,
}

impl ScalingParameters {
    /// The tables the bundled models were trained with.
    pub fn standard() -> Self {
        Self {
            min_max: vec![
                (Attribute::FastingGlucose, MinMaxRange { min: 75.0, max: 147.0 }),
                (Attribute::PostprandialGlucose, MinMaxRange { min: 76.0, max: 244.0 }),
                (Attribute::GlycatedHemoglobin, MinMaxRange { min: 4.32, max: 8.72 }),
            ],
            standardization: vec![
                (Attribute::Age, Standardization { mean: 50.19, stddev: 15.49 }),
                (Attribute::DiabetesRiskScore, Standardization { mean: 30.20, stddev: 9.00 }),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Transform {
    Identity,
    MinMax(MinMaxRange),
    ZScore(Standardization),
}

impl Transform {
    fn apply(self, raw: f64) -> f64 {
        match self {
            Transform::Identity => raw,
            Transform::MinMax(r) => (raw - r.min) / (r.max - r.min),
            Transform::ZScore(s) => (raw - s.mean) / s.stddev,
        }
    }
}

/// Applies a validated `ScalingParameters` table to patient records.
///
/// No clamping is performed: out-of-domain input produces out-of-range
/// output. Domain checks belong to `validate_record`.
#[derive(Debug, Clone)]
pub struct FeatureScaler {
    transforms: [Transform; FEATURE_COUNT],
}

impl FeatureScaler {
    /// Build a scaler from `params`.
    ///
    /// Returns `DiabriskError::Configuration` if a range is empty, a stddev is
    /// zero, any constant is non-finite, or an attribute is listed twice.
    pub fn new(params: &ScalingParameters) -> DiabriskResult<Self> {
        let mut transforms = [Transform::Identity; FEATURE_COUNT];

        for (attribute, range) in &params.min_max {
            if !range.min.is_finite() || !range.max.is_finite() || range.max == range.min {
                return Err(DiabriskError::Configuration {
                    reason: format!(
                        "min-max range for '{}' is degenerate: [{}, {}]",
                        attribute, range.min, range.max
                    ),
                });
            }
            assign(&mut transforms, *attribute, Transform::MinMax(*range))?;
        }

        for (attribute, z) in &params.standardization {
            if !z.mean.is_finite() || !z.stddev.is_finite() || z.stddev == 0.0 {
                return Err(DiabriskError::Configuration {
                    reason: format!(
                        "standardization for '{}' is degenerate: mean {}, stddev {}",
                        attribute, z.mean, z.stddev
                    ),
                });
            }
            assign(&mut transforms, *attribute, Transform::ZScore(*z))?;
        }

        Ok(Self { transforms })
    }

    /// A scaler over `ScalingParameters::standard()`.
    ///
    /// The fixed constants are all non-degenerate, so this cannot fail.
    pub fn standard() -> Self {
        let mut transforms = [Transform::Identity; FEATURE_COUNT];
        let params = ScalingParameters::standard();
        for (attribute, range) in params.min_max {
            transforms[attribute.index()] = Transform::MinMax(range);
        }
        for (attribute, z) in params.standardization {
            transforms[attribute.index()] = Transform::ZScore(z);
        }
        Self { transforms }
    }

    /// Scale every attribute of `record`.
    pub fn apply(&self, record: &PatientRecord) -> ScaledRecord {
        let mut values = [0.0; FEATURE_COUNT];
        for attribute in Attribute::ALL {
            let idx = attribute.index();
            values[idx] = self.transforms[idx].apply(record.value(attribute));
        }
        ScaledRecord::from_values(values)
    }

    /// Undo min-max scaling for one attribute.
    ///
    /// Returns `None` when `attribute` is not min-max scaled.
    pub fn inverse_min_max(&self, attribute: Attribute, scaled: f64) -> Option<f64> {
        match self.transforms[attribute.index()] {
            Transform::MinMax(r) => Some(scaled * (r.max - r.min) + r.min),
            _ => None,
        }
    }
}

fn assign(
    transforms: &mut [Transform; FEATURE_COUNT],
    attribute: Attribute,
    transform: Transform,
) -> DiabriskResult<()> {
    let slot = &mut transforms[attribute.index()];
    if *slot != Transform::Identity {
        return Err(DiabriskError::Configuration {
            reason: format!("attribute '{}' appears in more than one scaling entry", attribute),
        });
    }
    *slot = transform;
    Ok(())
}

//! The closed set of model artifacts and how they are read from disk.
//!
//! Every artifact file is a JSON document with a top-level `kind` naming the
//! model family and a `feature_names` list that must match the canonical
//! feature order exactly. Loading is: read bytes → verify checksum (if
//! configured) → check `kind` → deserialize → validate structure.

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use diabrisk_contracts::{
    error::{DiabriskError, DiabriskResult},
    model::ModelKind,
    patient::{Attribute, ScaledRecord, FEATURE_COUNT},
};
use diabrisk_core::traits::Predictor;

use crate::{
    boosted::GradientBoostedTreesModel, checksum::verify_sha256, forest::RandomForestModel,
    logistic::LogisticRegressionModel,
};

/// A loaded classifier, tagged by family.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelArtifact {
    LogisticRegression(LogisticRegressionModel),
    RandomForest(RandomForestModel),
    GradientBoosted(GradientBoostedTreesModel),
}

/// The part of an artifact read before committing to a concrete format.
#[derive(Deserialize)]
struct ArtifactHeader {
    kind: ModelKind,
}

impl ModelArtifact {
    pub fn kind(&self) -> ModelKind {
        match self {
            ModelArtifact::LogisticRegression(_) => ModelKind::LogisticRegression,
            ModelArtifact::RandomForest(_) => ModelKind::RandomForest,
            ModelArtifact::GradientBoosted(_) => ModelKind::GradientBoosted,
        }
    }

    /// Parse and validate an artifact document that must be of family `kind`.
    ///
    /// Returns a description of the problem on failure; callers attach the
    /// file path.
    pub fn from_json(kind: ModelKind, json: &str) -> Result<Self, String> {
        let header: ArtifactHeader =
            serde_json::from_str(json).map_err(|e| format!("invalid artifact JSON: {}", e))?;
        if header.kind != kind {
            return Err(format!("artifact declares kind {}, expected {}", header.kind, kind));
        }

        let artifact = match kind {
            ModelKind::LogisticRegression => {
                let model: LogisticRegressionModel = parse_body(json)?;
                model.validate()?;
                ModelArtifact::LogisticRegression(model)
            }
            ModelKind::RandomForest => {
                let model: RandomForestModel = parse_body(json)?;
                model.validate()?;
                ModelArtifact::RandomForest(model)
            }
            ModelKind::GradientBoosted => {
                let model: GradientBoostedTreesModel = parse_body(json)?;
                model.validate()?;
                ModelArtifact::GradientBoosted(model)
            }
        };

        Ok(artifact)
    }

    /// Read the artifact at `path`.
    ///
    /// Returns `DiabriskError::ArtifactLoad` if the file is missing or
    /// unreadable, fails its checksum, declares the wrong kind, or violates
    /// the artifact format.
    pub fn load(kind: ModelKind, path: &Path, expected_sha256: Option<&str>) -> DiabriskResult<Self> {
        let load_error = |reason: String| DiabriskError::ArtifactLoad {
            path: path.display().to_string(),
            reason,
        };

        debug!(model = %kind, path = %path.display(), "reading model artifact");

        let bytes = std::fs::read(path).map_err(|e| load_error(format!("cannot read file: {}", e)))?;

        if let Some(expected) = expected_sha256 {
            verify_sha256(&bytes, expected).map_err(load_error)?;
        }

        let json = std::str::from_utf8(&bytes)
            .map_err(|e| load_error(format!("artifact is not UTF-8: {}", e)))?;
        let artifact = Self::from_json(kind, json).map_err(load_error)?;

        info!(
            model = %kind,
            path = %path.display(),
            checksum_verified = expected_sha256.is_some(),
            "model artifact loaded"
        );

        Ok(artifact)
    }
}

impl Predictor for ModelArtifact {
    fn predict_probability(&self, features: &ScaledRecord) -> DiabriskResult<f64> {
        match self {
            ModelArtifact::LogisticRegression(m) => m.predict_probability(features),
            ModelArtifact::RandomForest(m) => m.predict_probability(features),
            ModelArtifact::GradientBoosted(m) => m.predict_probability(features),
        }
    }

    fn predict(&self, features: &ScaledRecord) -> DiabriskResult<u8> {
        match self {
            ModelArtifact::LogisticRegression(m) => m.predict(features),
            ModelArtifact::RandomForest(m) => m.predict(features),
            ModelArtifact::GradientBoosted(m) => m.predict(features),
        }
    }

    fn predict_with_probability(&self, features: &ScaledRecord) -> DiabriskResult<(u8, f64)> {
        match self {
            ModelArtifact::LogisticRegression(m) => m.predict_with_probability(features),
            ModelArtifact::RandomForest(m) => m.predict_with_probability(features),
            ModelArtifact::GradientBoosted(m) => m.predict_with_probability(features),
        }
    }
}

fn parse_body<T: for<'de> Deserialize<'de>>(json: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("invalid artifact JSON: {}", e))
}

/// Require `names` to list the canonical feature names in order.
pub(crate) fn check_feature_names(names: &[String]) -> Result<(), String> {
    let expected: Vec<&str> = Attribute::ALL.iter().map(|a| a.name()).collect();
    if names.len() != FEATURE_COUNT || names.iter().zip(&expected).any(|(n, e)| n != e) {
        return Err(format!(
            "feature_names {:?} do not match expected order {:?}",
            names, expected
        ));
    }
    Ok(())
}

/// Numerically stable logistic function.
pub(crate) fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

//! The model registry: all three artifacts, loaded once.
//!
//! The registry is built at startup and only ever borrowed afterwards. There
//! is no partial-availability mode: if any artifact fails to load, `load`
//! fails and nothing is served.

use tracing::info;

use diabrisk_contracts::{
    error::{DiabriskError, DiabriskResult},
    model::ModelKind,
};
use diabrisk_core::traits::{ModelSource, Predictor};

use crate::{
    artifact::ModelArtifact, boosted::GradientBoostedTreesModel, config::RegistryConfig,
    forest::RandomForestModel, logistic::LogisticRegressionModel,
};

/// Immutable holder of the three loaded classifiers.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    logistic_regression: ModelArtifact,
    random_forest: ModelArtifact,
    gradient_boosted: ModelArtifact,
}

impl ModelRegistry {
    /// Load every artifact named in `config`.
    ///
    /// Returns the first `DiabriskError::ArtifactLoad` encountered.
    pub fn load(config: &RegistryConfig) -> DiabriskResult<Self> {
        let load = |kind: ModelKind| {
            ModelArtifact::load(kind, &config.artifact_path(kind), config.checksum(kind))
        };

        let registry = Self {
            logistic_regression: load(ModelKind::LogisticRegression)?,
            random_forest: load(ModelKind::RandomForest)?,
            gradient_boosted: load(ModelKind::GradientBoosted)?,
        };

        info!(models = ModelKind::ALL.len(), "model registry ready");
        Ok(registry)
    }

    /// Assemble a registry from in-memory models.
    ///
    /// Each model goes through the same structural checks as a file artifact;
    /// the first failure is returned as `DiabriskError::ArtifactLoad`.
    pub fn from_models(
        logistic_regression: LogisticRegressionModel,
        random_forest: RandomForestModel,
        gradient_boosted: GradientBoostedTreesModel,
    ) -> DiabriskResult<Self> {
        check_in_memory(ModelKind::LogisticRegression, logistic_regression.validate())?;
        check_in_memory(ModelKind::RandomForest, random_forest.validate())?;
        check_in_memory(ModelKind::GradientBoosted, gradient_boosted.validate())?;

        Ok(Self {
            logistic_regression: ModelArtifact::LogisticRegression(logistic_regression),
            random_forest: ModelArtifact::RandomForest(random_forest),
            gradient_boosted: ModelArtifact::GradientBoosted(gradient_boosted),
        })
    }

    /// Look up a model by its selection name.
    ///
    /// Returns `DiabriskError::UnknownModel` for anything other than
    /// "LogisticRegression", "RandomForest", or "GradientBoosted".
    pub fn select(&self, name: &str) -> DiabriskResult<&ModelArtifact> {
        let kind = name.parse::<ModelKind>()?;
        Ok(self.get(kind))
    }

    pub fn get(&self, kind: ModelKind) -> &ModelArtifact {
        match kind {
            ModelKind::LogisticRegression => &self.logistic_regression,
            ModelKind::RandomForest => &self.random_forest,
            ModelKind::GradientBoosted => &self.gradient_boosted,
        }
    }

    /// The kinds this registry serves, in listing order.
    pub fn kinds(&self) -> [ModelKind; 3] {
        ModelKind::ALL
    }
}

impl ModelSource for ModelRegistry {
    fn predictor(&self, kind: ModelKind) -> &dyn Predictor {
        self.get(kind)
    }
}

fn check_in_memory(kind: ModelKind, outcome: Result<(), String>) -> DiabriskResult<()> {
    outcome.map_err(|reason| DiabriskError::ArtifactLoad {
        path: format!("<in-memory {}>", kind),
        reason,
    })
}

//! Registry configuration loaded from TOML.
//!
//! ```toml
//! [models]
//! logistic_regression_path = "logistic_regression.json"
//! random_forest_path = "random_forest.json"
//! gradient_boosted_path = "gradient_boosted.json"
//!
//! [checksums]
//! random_forest = "9f86d081884c7d65..."
//! ```
//!
//! All three paths are required. Relative paths are resolved against the
//! directory holding the config file, so a config and its artifacts can be
//! moved together.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use diabrisk_contracts::{
    error::{DiabriskError, DiabriskResult},
    model::ModelKind,
};

/// Where each artifact lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelPaths {
    #[serde(alias = "logisticRegressionPath")]
    pub logistic_regression_path: PathBuf,
    #[serde(alias = "randomForestPath")]
    pub random_forest_path: PathBuf,
    #[serde(alias = "gradientBoostedPath")]
    pub gradient_boosted_path: PathBuf,
}

/// Optional SHA-256 digests pinning each artifact's bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactChecksums {
    pub logistic_regression: Option<String>,
    pub random_forest: Option<String>,
    pub gradient_boosted: Option<String>,
}

/// The top-level structure deserialized from a registry TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    pub models: ModelPaths,

    #[serde(default)]
    pub checksums: ArtifactChecksums,

    /// Directory relative artifact paths are resolved against.
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl RegistryConfig {
    /// Build a configuration directly from three paths, with no checksums.
    pub fn new(
        logistic_regression_path: impl Into<PathBuf>,
        random_forest_path: impl Into<PathBuf>,
        gradient_boosted_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            models: ModelPaths {
                logistic_regression_path: logistic_regression_path.into(),
                random_forest_path: random_forest_path.into(),
                gradient_boosted_path: gradient_boosted_path.into(),
            },
            checksums: ArtifactChecksums::default(),
            base_dir: None,
        }
    }

    /// Parse `s` as TOML.
    ///
    /// Returns `DiabriskError::Configuration` if the TOML is malformed, a
    /// path is missing, or a path is empty.
    pub fn from_toml_str(s: &str) -> DiabriskResult<Self> {
        let config: RegistryConfig = toml::from_str(s).map_err(|e| DiabriskError::Configuration {
            reason: format!("failed to parse model config TOML: {}", e),
        })?;

        for kind in ModelKind::ALL {
            if config.raw_path(kind).as_os_str().is_empty() {
                return Err(DiabriskError::Configuration {
                    reason: format!("artifact path for {} is empty", kind),
                });
            }
        }

        Ok(config)
    }

    /// Read and parse the file at `path`; relative artifact paths resolve
    /// against its parent directory.
    pub fn from_file(path: &Path) -> DiabriskResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| DiabriskError::Configuration {
            reason: format!("failed to read model config '{}': {}", path.display(), e),
        })?;
        let mut config = Self::from_toml_str(&contents)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Resolve relative artifact paths against `dir` instead.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// The resolved artifact path for `kind`.
    pub fn artifact_path(&self, kind: ModelKind) -> PathBuf {
        let raw = self.raw_path(kind);
        match &self.base_dir {
            Some(dir) if raw.is_relative() => dir.join(raw),
            _ => raw.to_path_buf(),
        }
    }

    /// The configured checksum for `kind`, if any.
    pub fn checksum(&self, kind: ModelKind) -> Option<&str> {
        match kind {
            ModelKind::LogisticRegression => self.checksums.logistic_regression.as_deref(),
            ModelKind::RandomForest => self.checksums.random_forest.as_deref(),
            ModelKind::GradientBoosted => self.checksums.gradient_boosted.as_deref(),
        }
    }

    fn raw_path(&self, kind: ModelKind) -> &Path {
        match kind {
            ModelKind::LogisticRegression => &self.models.logistic_regression_path,
            ModelKind::RandomForest => &self.models.random_forest_path,
            ModelKind::GradientBoosted => &self.models.gradient_boosted_path,
        }
    }
}

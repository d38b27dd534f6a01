//! Error types for the diabrisk prediction pipeline.
//!
//! All fallible operations return `DiabriskResult<T>`. Variants carry enough
//! context for the CLI to print an actionable message without re-deriving it.

use thiserror::Error;

/// The unified error type for the diabrisk workspace.
#[derive(Debug, Error)]
pub enum DiabriskError {
    /// An attribute lies outside its declared clinical domain.
    ///
    /// No scaling or model invocation happens once this is raised.
    #[error("attribute '{attribute}' = {value} is outside its domain [{min}, {max}]")]
    Validation {
        attribute: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A scaling table or configuration file is degenerate or incomplete.
    ///
    /// Fatal at startup.
    #[error("configuration error: {reason}")]
    Configuration { reason: String },

    /// The caller asked for a model name the registry does not know.
    #[error("unknown model '{name}' (expected LogisticRegression, RandomForest, or GradientBoosted)")]
    UnknownModel { name: String },

    /// A model artifact could not be read, parsed, or failed integrity checks.
    ///
    /// Fatal at startup: the registry has no partial-availability mode.
    #[error("failed to load model artifact '{path}': {reason}")]
    ArtifactLoad { path: String, reason: String },

    /// The selected model could not evaluate the feature vector.
    #[error("inference failed: {reason}")]
    Inference { reason: String },
}

/// Convenience alias used throughout the diabrisk crates.
pub type DiabriskResult<T> = Result<T, DiabriskError>;

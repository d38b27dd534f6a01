//! # diabrisk-core
//!
//! Feature scaling and risk classification for diabrisk.
//!
//! This crate provides:
//! - The `Predictor` and `ModelSource` traits that model implementations satisfy
//! - `validate_record`, the domain check every record passes first
//! - `FeatureScaler`, the fixed min-max / z-score transform
//! - `RiskClassifier`, which wires them together in the correct order
//!
//! ## Usage
//!
//! ```rust,ignore
//! use diabrisk_core::RiskClassifier;
//!
//! let classifier = RiskClassifier::with_standard_scaling(&registry);
//! let result = classifier.classify(&record, "RandomForest")?;
//! ```

pub mod classifier;
pub mod scaler;
pub mod traits;
pub mod validate;

pub use classifier::RiskClassifier;
pub use scaler::{FeatureScaler, MinMaxRange, ScalingParameters, Standardization};
pub use traits::{check_features, ModelSource, Predictor};
pub use validate::validate_record;

// ── Tests ─────────────────────────────────────────────────────────────────────

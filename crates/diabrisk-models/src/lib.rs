//! # diabrisk-models
//!
//! Classifier artifacts and the TOML-configured registry that loads them.
//!
//! ## Overview
//!
//! Three model families are supported, each stored as a JSON artifact:
//!
//! - [`LogisticRegressionModel`]: coefficients + intercept
//! - [`RandomForestModel`]: averaged probability trees
//! - [`GradientBoostedTreesModel`]: additive log-odds trees
//!
//! [`ModelRegistry::load`] reads all three once from the paths in a
//! [`RegistryConfig`], optionally verifying SHA-256 checksums, and implements
//! [`ModelSource`](diabrisk_core::traits::ModelSource) for the classifier.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use diabrisk_models::{ModelRegistry, RegistryConfig};
//!
//! let config = RegistryConfig::from_file(Path::new("models/diabrisk.toml"))?;
//! let registry = ModelRegistry::load(&config)?;
//! ```

pub mod artifact;
pub mod boosted;
pub mod checksum;
pub mod config;
pub mod forest;
pub mod logistic;
pub mod registry;
pub mod tree;

pub use artifact::ModelArtifact;
pub use boosted::GradientBoostedTreesModel;
pub use config::{ArtifactChecksums, ModelPaths, RegistryConfig};
pub use forest::RandomForestModel;
pub use logistic::LogisticRegressionModel;
pub use registry::ModelRegistry;
pub use tree::{DecisionTree, SplitRule, TreeNode};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use diabrisk_contracts::{
        error::DiabriskError,
        model::ModelKind,
        patient::{PatientRecord, ScaledRecord},
        prediction::RiskTier,
    };
    use diabrisk_core::{traits::Predictor, FeatureScaler, RiskClassifier};

    use super::*;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn bundled_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../models")
    }

    fn bundled_registry() -> ModelRegistry {
        let config = RegistryConfig::from_file(&bundled_dir().join("diabrisk.toml")).unwrap();
        ModelRegistry::load(&config).unwrap()
    }

    fn high_risk_record() -> PatientRecord {
        PatientRecord {
            age: 70.0,
            family_history_of_diabetes: true,
            fasting_glucose: 140.0,
            postprandial_glucose: 230.0,
            glycated_hemoglobin: 8.3,
            diabetes_risk_score: 48.0,
        }
    }

    /// Write `contents` to a unique file under the system temp dir.
    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("diabrisk-models-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn names() -> Vec<String> {
        [
            "age",
            "family_history_of_diabetes",
            "fasting_glucose",
            "postprandial_glucose",
            "glycated_hemoglobin",
            "diabetes_risk_score",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    // ── 1. bundled artifacts ──────────────────────────────────────────────────

    /// The shipped config loads, including checksum verification.
    #[test]
    fn test_bundled_registry_loads() {
        let registry = bundled_registry();
        for kind in registry.kinds() {
            assert_eq!(registry.get(kind).kind(), kind);
        }
    }

    /// Default intake values land in the expected tiers for each model.
    #[test]
    fn test_default_record_probabilities() {
        let registry = bundled_registry();
        let classifier = RiskClassifier::with_standard_scaling(&registry);
        let record = PatientRecord::default();

        let lr = classifier.classify(&record, "LogisticRegression").unwrap();
        assert!((lr.probability - 0.388_34).abs() < 1e-4, "lr p = {}", lr.probability);
        assert_eq!(lr.label, 0);
        assert_eq!(lr.tier(), RiskTier::Moderate);

        let rf = classifier.classify(&record, "RandomForest").unwrap();
        assert!((rf.probability - 0.2125).abs() < 1e-9, "rf p = {}", rf.probability);
        assert_eq!(rf.tier(), RiskTier::Low);

        let gb = classifier.classify(&record, "GradientBoosted").unwrap();
        assert!((gb.probability - 0.282_92).abs() < 1e-4, "gb p = {}", gb.probability);
        assert_eq!(gb.tier(), RiskTier::Low);
    }

    /// A clearly elevated record is high risk with label 1 on every model.
    #[test]
    fn test_high_risk_record_is_positive_everywhere() {
        let registry = bundled_registry();
        let classifier = RiskClassifier::with_standard_scaling(&registry);

        for assessment in classifier.assess_all(&high_risk_record()).unwrap() {
            assert_eq!(assessment.result.label, 1, "{}", assessment.model);
            assert_eq!(assessment.tier, RiskTier::High, "{}", assessment.model);
        }

        let rf = classifier.classify(&high_risk_record(), "RandomForest").unwrap();
        assert!((rf.probability - 0.8025).abs() < 1e-9);
    }

    // ── 2. selection ──────────────────────────────────────────────────────────

    #[test]
    fn test_select_by_name() {
        let registry = bundled_registry();
        assert_eq!(
            registry.select("GradientBoosted").unwrap().kind(),
            ModelKind::GradientBoosted
        );
        match registry.select("Foo") {
            Err(DiabriskError::UnknownModel { name }) => assert_eq!(name, "Foo"),
            other => panic!("expected UnknownModel, got {:?}", other),
        }
    }

    // ── 3. load failures ──────────────────────────────────────────────────────

    /// A missing artifact makes the whole registry fail.
    #[test]
    fn test_missing_artifact_is_load_error() {
        let config = RegistryConfig::new(
            "logistic_regression.json",
            "does_not_exist.json",
            "gradient_boosted.json",
        )
        .with_base_dir(bundled_dir());

        match ModelRegistry::load(&config) {
            Err(DiabriskError::ArtifactLoad { path, reason }) => {
                assert!(path.ends_with("does_not_exist.json"), "path: {path}");
                assert!(reason.contains("cannot read file"), "reason: {reason}");
            }
            other => panic!("expected ArtifactLoad, got {:?}", other),
        }
    }

    /// A checksum that does not match the file is treated as corruption.
    #[test]
    fn test_checksum_mismatch_is_load_error() {
        let toml = r#"
            [models]
            logistic_regression_path = "logistic_regression.json"
            random_forest_path = "random_forest.json"
            gradient_boosted_path = "gradient_boosted.json"

            [checksums]
            random_forest = "0000000000000000000000000000000000000000000000000000000000000000"
        "#;
        let config = RegistryConfig::from_toml_str(toml)
            .unwrap()
            .with_base_dir(bundled_dir());

        match ModelRegistry::load(&config) {
            Err(DiabriskError::ArtifactLoad { path, reason }) => {
                assert!(path.ends_with("random_forest.json"));
                assert!(reason.contains("checksum mismatch"), "reason: {reason}");
            }
            other => panic!("expected ArtifactLoad, got {:?}", other),
        }
    }

    /// Pointing a slot at another family's artifact is rejected.
    #[test]
    fn test_swapped_artifacts_are_rejected() {
        let config = RegistryConfig::new(
            "random_forest.json",
            "logistic_regression.json",
            "gradient_boosted.json",
        )
        .with_base_dir(bundled_dir());

        match ModelRegistry::load(&config) {
            Err(DiabriskError::ArtifactLoad { reason, .. }) => {
                assert!(reason.contains("declares kind RandomForest"), "reason: {reason}");
            }
            other => panic!("expected ArtifactLoad, got {:?}", other),
        }
    }

    #[test]
    fn test_unparsable_artifact_is_load_error() {
        let path = temp_file("garbage.json", "{ not json");
        match ModelArtifact::load(ModelKind::LogisticRegression, &path, None) {
            Err(DiabriskError::ArtifactLoad { reason, .. }) => {
                assert!(reason.contains("invalid artifact JSON"), "reason: {reason}");
            }
            other => panic!("expected ArtifactLoad, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_feature_order_is_rejected() {
        let mut reordered = names();
        reordered.swap(2, 3);
        let json = serde_json::json!({
            "kind": "LogisticRegression",
            "feature_names": reordered,
            "coefficients": [0.1, 0.2, 0.3, 0.4, 0.5, 0.6],
            "intercept": 0.0
        })
        .to_string();

        let err = ModelArtifact::from_json(ModelKind::LogisticRegression, &json).unwrap_err();
        assert!(err.contains("feature_names"), "unexpected: {err}");
    }

    #[test]
    fn test_short_coefficient_vector_is_rejected() {
        let json = serde_json::json!({
            "kind": "LogisticRegression",
            "feature_names": names(),
            "coefficients": [0.1, 0.2],
            "intercept": 0.0
        })
        .to_string();

        let err = ModelArtifact::from_json(ModelKind::LogisticRegression, &json).unwrap_err();
        assert!(err.contains("expected 6 coefficients"), "unexpected: {err}");
    }

    #[test]
    fn test_forest_leaf_outside_unit_interval_is_rejected() {
        let json = serde_json::json!({
            "kind": "RandomForest",
            "feature_names": names(),
            "trees": [ { "nodes": [ { "leaf": { "value": 1.4 } } ] } ]
        })
        .to_string();

        let err = ModelArtifact::from_json(ModelKind::RandomForest, &json).unwrap_err();
        assert!(err.contains("outside [0, 1]"), "unexpected: {err}");
    }

    #[test]
    fn test_empty_ensembles_are_rejected() {
        let forest = serde_json::json!({
            "kind": "RandomForest",
            "feature_names": names(),
            "trees": []
        })
        .to_string();
        assert!(ModelArtifact::from_json(ModelKind::RandomForest, &forest).is_err());

        let boosted = serde_json::json!({
            "kind": "GradientBoosted",
            "feature_names": names(),
            "base_margin": 0.0,
            "trees": []
        })
        .to_string();
        assert!(ModelArtifact::from_json(ModelKind::GradientBoosted, &boosted).is_err());
    }

    // ── 4. configuration ──────────────────────────────────────────────────────

    #[test]
    fn test_camel_case_keys_are_accepted() {
        let toml = r#"
            [models]
            logisticRegressionPath = "/opt/models/lr.json"
            randomForestPath = "/opt/models/rf.json"
            gradientBoostedPath = "/opt/models/gb.json"
        "#;
        let config = RegistryConfig::from_toml_str(toml).unwrap();
        assert_eq!(
            config.artifact_path(ModelKind::RandomForest),
            PathBuf::from("/opt/models/rf.json")
        );
        assert_eq!(config.checksum(ModelKind::RandomForest), None);
    }

    #[test]
    fn test_missing_path_is_configuration_error() {
        let toml = r#"
            [models]
            logistic_regression_path = "lr.json"
            random_forest_path = "rf.json"
        "#;
        match RegistryConfig::from_toml_str(toml) {
            Err(DiabriskError::Configuration { reason }) => {
                assert!(reason.contains("gradient_boosted_path"), "reason: {reason}");
            }
            other => panic!("expected Configuration, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_path_is_configuration_error() {
        let toml = r#"
            [models]
            logistic_regression_path = ""
            random_forest_path = "rf.json"
            gradient_boosted_path = "gb.json"
        "#;
        assert!(matches!(
            RegistryConfig::from_toml_str(toml),
            Err(DiabriskError::Configuration { .. })
        ));
    }

    #[test]
    fn test_relative_paths_resolve_against_config_dir() {
        let config = RegistryConfig::new("a.json", "/abs/b.json", "c.json").with_base_dir("/etc/diabrisk");
        assert_eq!(
            config.artifact_path(ModelKind::LogisticRegression),
            PathBuf::from("/etc/diabrisk/a.json")
        );
        assert_eq!(
            config.artifact_path(ModelKind::RandomForest),
            PathBuf::from("/abs/b.json")
        );
    }

    #[test]
    fn test_missing_config_file_is_configuration_error() {
        assert!(matches!(
            RegistryConfig::from_file(Path::new("/nonexistent/diabrisk.toml")),
            Err(DiabriskError::Configuration { .. })
        ));
    }

    // ── 5. inference ──────────────────────────────────────────────────────────

    #[test]
    fn test_non_finite_features_are_inference_errors() {
        let registry = bundled_registry();
        let bad = ScaledRecord::from_values([0.0, 0.0, f64::INFINITY, 0.5, 0.5, 0.0]);

        for kind in ModelKind::ALL {
            assert!(matches!(
                registry.get(kind).predict_probability(&bad),
                Err(DiabriskError::Inference { .. })
            ));
        }
    }

    #[test]
    fn test_logistic_probability_is_sigmoid_of_margin() {
        let model = LogisticRegressionModel {
            feature_names: names(),
            coefficients: vec![0.0, 2.0, 0.0, 0.0, 0.0, 0.0],
            intercept: -2.0,
        };
        model.validate().unwrap();

        let zero = ScaledRecord::from_values([0.0; 6]);
        let one = ScaledRecord::from_values([0.0, 1.0, 0.0, 0.0, 0.0, 0.0]);

        // margin 0 => exactly 0.5, which predicts the negative class
        assert!((model.predict_probability(&one).unwrap() - 0.5).abs() < 1e-12);
        assert_eq!(model.predict(&one).unwrap(), 0);
        assert!(model.predict_probability(&zero).unwrap() < 0.5);
    }

    #[test]
    fn test_registry_from_models_serves_in_memory_artifacts() {
        let lr = LogisticRegressionModel {
            feature_names: names(),
            coefficients: vec![0.0; 6],
            intercept: 3.0,
        };
        let leaf = |value: f64| DecisionTree {
            nodes: vec![TreeNode::Leaf { value }],
        };
        let rf = RandomForestModel {
            feature_names: names(),
            trees: vec![leaf(0.1), leaf(0.3)],
        };
        let gb = GradientBoostedTreesModel {
            feature_names: names(),
            base_margin: 0.0,
            trees: vec![leaf(-1.0)],
        };
        let registry = ModelRegistry::from_models(lr, rf, gb).unwrap();
        let classifier = RiskClassifier::new(FeatureScaler::standard(), &registry);

        let rf = classifier.classify(&PatientRecord::default(), "RandomForest").unwrap();
        assert!((rf.probability - 0.2).abs() < 1e-12);
        assert_eq!(rf.tier(), RiskTier::Low);

        let lr = classifier.classify(&PatientRecord::default(), "LogisticRegression").unwrap();
        assert_eq!(lr.label, 1);
    }

    #[test]
    fn test_registry_from_models_rejects_malformed_models() {
        let leaf = |value: f64| DecisionTree {
            nodes: vec![TreeNode::Leaf { value }],
        };
        let short_lr = LogisticRegressionModel {
            feature_names: names(),
            coefficients: vec![5.0],
            intercept: 0.0,
        };
        let rf = RandomForestModel {
            feature_names: names(),
            trees: vec![leaf(0.1)],
        };
        let gb = GradientBoostedTreesModel {
            feature_names: names(),
            base_margin: 0.0,
            trees: vec![leaf(0.0)],
        };

        match ModelRegistry::from_models(short_lr, rf.clone(), gb.clone()) {
            Err(DiabriskError::ArtifactLoad { path, reason }) => {
                assert!(path.contains("LogisticRegression"));
                assert!(reason.contains("coefficients"), "reason: {}", reason);
            }
            other => panic!("expected ArtifactLoad, got {:?}", other),
        }

        let ok_lr = LogisticRegressionModel {
            feature_names: names(),
            coefficients: vec![0.0; 6],
            intercept: 0.0,
        };
        let bad_rf = RandomForestModel {
            feature_names: names(),
            trees: vec![leaf(1.4)],
        };
        assert!(matches!(
            ModelRegistry::from_models(ok_lr, bad_rf, gb),
            Err(DiabriskError::ArtifactLoad { .. })
        ));
    }

    #[test]
    fn test_logistic_coefficient_count_mismatch_is_inference_error() {
        let model = LogisticRegressionModel {
            feature_names: names(),
            coefficients: vec![5.0],
            intercept: 0.0,
        };
        let features = ScaledRecord::from_values([0.0, 0.0, 0.5, 0.5, 0.5, 0.0]);

        match model.predict_probability(&features) {
            Err(DiabriskError::Inference { reason }) => {
                assert!(reason.contains("1 coefficients"), "reason: {}", reason)
            }
            other => panic!("expected Inference, got {:?}", other),
        }
    }
}

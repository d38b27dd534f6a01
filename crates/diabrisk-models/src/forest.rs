//! Random forest artifact.

use serde::{Deserialize, Serialize};

use diabrisk_contracts::{error::DiabriskResult, patient::ScaledRecord};
use diabrisk_core::traits::{check_features, Predictor};

use crate::{
    artifact::check_feature_names,
    tree::{DecisionTree, SplitRule},
};

/// An averaging ensemble. Each leaf stores the positive-class fraction of
/// the training samples that reached it; the forest probability is the mean
/// over trees. Splits go left on `<=`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForestModel {
    pub feature_names: Vec<String>,
    pub trees: Vec<DecisionTree>,
}

impl RandomForestModel {
    pub fn validate(&self) -> Result<(), String> {
        check_feature_names(&self.feature_names)?;
        if self.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }
        for (idx, tree) in self.trees.iter().enumerate() {
            tree.validate().map_err(|e| format!("tree {}: {}", idx, e))?;
            if tree.leaf_values().any(|v| !(0.0..=1.0).contains(&v)) {
                return Err(format!("tree {}: leaf probability outside [0, 1]", idx));
            }
        }
        Ok(())
    }
}

impl Predictor for RandomForestModel {
    fn predict_probability(&self, features: &ScaledRecord) -> DiabriskResult<f64> {
        check_features(features)?;
        let mut total = 0.0;
        for tree in &self.trees {
            total += tree.evaluate(features.as_slice(), SplitRule::LessOrEqual)?;
        }
        Ok(total / self.trees.len() as f64)
    }
}

//! Gradient boosted trees artifact.

use serde::{Deserialize, Serialize};

use diabrisk_contracts::{error::DiabriskResult, patient::ScaledRecord};
use diabrisk_core::traits::{check_features, Predictor};

use crate::{
    artifact::{check_feature_names, sigmoid},
    tree::{DecisionTree, SplitRule},
};

/// An additive ensemble in log-odds space:
/// `p = sigmoid(base_margin + Σ leaf values)`. Leaf values already include
/// the learning rate. Splits go left on `<`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientBoostedTreesModel {
    pub feature_names: Vec<String>,
    pub base_margin: f64,
    pub trees: Vec<DecisionTree>,
}

impl GradientBoostedTreesModel {
    pub fn validate(&self) -> Result<(), String> {
        check_feature_names(&self.feature_names)?;
        if !self.base_margin.is_finite() {
            return Err("base_margin must be finite".to_string());
        }
        if self.trees.is_empty() {
            return Err("ensemble has no trees".to_string());
        }
        for (idx, tree) in self.trees.iter().enumerate() {
            tree.validate().map_err(|e| format!("tree {}: {}", idx, e))?;
        }
        Ok(())
    }

    /// Sum of the base margin and every tree's leaf value.
    pub fn margin(&self, features: &ScaledRecord) -> DiabriskResult<f64> {
        let mut margin = self.base_margin;
        for tree in &self.trees {
            margin += tree.evaluate(features.as_slice(), SplitRule::Less)?;
        }
        Ok(margin)
    }
}

impl Predictor for GradientBoostedTreesModel {
    fn predict_probability(&self, features: &ScaledRecord) -> DiabriskResult<f64> {
        check_features(features)?;
        Ok(sigmoid(self.margin(features)?))
    }
}

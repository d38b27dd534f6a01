//! Binary decision trees shared by the forest and boosted artifacts.
//!
//! A tree is a flat `nodes` array with the root at index 0. Children always
//! sit at a strictly larger index than their parent, which `validate`
//! enforces; that ordering alone guarantees every walk terminates.

use serde::{Deserialize, Serialize};

use diabrisk_contracts::{
    error::{DiabriskError, DiabriskResult},
    patient::FEATURE_COUNT,
};

/// One node of a decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    /// Internal node routing on one feature.
    Split {
        /// Index into the canonical feature vector.
        feature: usize,
        threshold: f64,
        /// Node index taken when the comparison holds.
        left: usize,
        /// Node index taken otherwise.
        right: usize,
    },
    /// Terminal node.
    Leaf { value: f64 },
}

/// How a split compares a feature against its threshold.
///
/// Forests trained with CART go left on `<=`; histogram boosters go left
/// on `<`. The difference matters for features sitting exactly on a
/// threshold, which min-max scaled inputs frequently do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitRule {
    LessOrEqual,
    Less,
}

impl SplitRule {
    fn goes_left(self, value: f64, threshold: f64) -> bool {
        match self {
            SplitRule::LessOrEqual => value <= threshold,
            SplitRule::Less => value < threshold,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Check structural invariants.
    ///
    /// Returns a description of the first violation found.
    pub fn validate(&self) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }

        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= FEATURE_COUNT {
                        return Err(format!(
                            "node {} splits on feature {} (only {} features exist)",
                            idx, feature, FEATURE_COUNT
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {} has non-finite threshold", idx));
                    }
                    for child in [*left, *right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(format!(
                                "node {} has child {} (must be in {}..{})",
                                idx,
                                child,
                                idx + 1,
                                self.nodes.len()
                            ));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(format!("leaf {} has non-finite value", idx));
                    }
                }
            }
        }

        Ok(())
    }

    /// Iterate over the values of every leaf.
    pub fn leaf_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.nodes.iter().filter_map(|node| match node {
            TreeNode::Leaf { value } => Some(*value),
            TreeNode::Split { .. } => None,
        })
    }

    /// Walk from the root to a leaf and return its value.
    ///
    /// Returns `DiabriskError::Inference` if the walk leaves the node array
    /// or the feature vector, which only an unvalidated tree can do.
    pub fn evaluate(&self, features: &[f64], rule: SplitRule) -> DiabriskResult<f64> {
        let mut idx = 0;
        loop {
            let node = self.nodes.get(idx).ok_or_else(|| DiabriskError::Inference {
                reason: format!("tree walk reached missing node {}", idx),
            })?;

            match node {
                TreeNode::Leaf { value } => return Ok(*value),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = features.get(*feature).ok_or_else(|| DiabriskError::Inference {
                        reason: format!(
                            "tree splits on feature {} but only {} features were given",
                            feature,
                            features.len()
                        ),
                    })?;
                    let next = if rule.goes_left(*value, *threshold) { *left } else { *right };
                    if next <= idx {
                        return Err(DiabriskError::Inference {
                            reason: format!("tree walk from node {} does not advance", idx),
                        });
                    }
                    idx = next;
                }
            }
        }
    }
}

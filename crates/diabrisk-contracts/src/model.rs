//! Model identity types.
//!
//! The set of classifiers is closed: exactly three model families are shipped,
//! and every lookup by name goes through `ModelKind::from_str`.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::DiabriskError;

/// The three classifier families the registry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    LogisticRegression,
    RandomForest,
    GradientBoosted,
}

impl ModelKind {
    /// All kinds, in the order they are listed to users.
    pub const ALL: [ModelKind; 3] = [
        ModelKind::LogisticRegression,
        ModelKind::RandomForest,
        ModelKind::GradientBoosted,
    ];

    /// The selection name callers pass to the classifier.
    pub fn name(self) -> &'static str {
        match self {
            ModelKind::LogisticRegression => "LogisticRegression",
            ModelKind::RandomForest => "RandomForest",
            ModelKind::GradientBoosted => "GradientBoosted",
        }
    }

    /// One-sentence summary shown in model listings.
    pub fn description(self) -> &'static str {
        match self {
            ModelKind::LogisticRegression => {
                "Interpretable statistical model estimating diabetes probability from a linear combination of the attributes."
            }
            ModelKind::RandomForest => {
                "Ensemble of decision trees that averages many predictors to improve accuracy and reduce overfitting."
            }
            ModelKind::GradientBoosted => {
                "Boosted tree ensemble where each tree corrects the errors of the previous ones; high accuracy on clinical data."
            }
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelKind {
    type Err = DiabriskError;

    /// Parse an exact, case-sensitive model name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| DiabriskError::UnknownModel {
                name: s.to_string(),
            })
    }
}

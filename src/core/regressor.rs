//! Regression models evaluated at serving time.
//!
//! The training pipeline exports its best estimator as JSON. Two families are
//! understood: linear models (ridge and friends) and tree ensembles, covering
//! random forests (mean of trees) and gradient boosting (additive trees).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::features::{FeatureVector, FEATURE_COUNT};
use crate::error::ArtifactError;

/// Errors raised while evaluating a model on one row
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("tree {tree} references missing node {node}")]
    MissingNode { tree: usize, node: usize },

    #[error("feature index {0} is out of range")]
    FeatureIndex(usize),

    #[error("{0}")]
    Other(String),
}

/// A trained model that maps one scaled feature row to a raw score
pub trait Regressor: Send + Sync + std::fmt::Debug {
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError>;

    /// Short family name used in logs
    fn name(&self) -> &'static str;
}

/// Serialized model artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear(LinearModel),
    TreeEnsemble(TreeEnsemble),
}

impl ModelArtifact {
    /// Check structure and turn the artifact into a ready-to-use model
    pub fn into_regressor(self) -> Result<Box<dyn Regressor>, ArtifactError> {
        match self {
            ModelArtifact::Linear(model) => {
                model.validate()?;
                Ok(Box::new(model))
            }
            ModelArtifact::TreeEnsemble(model) => {
                model.validate()?;
                Ok(Box::new(model))
            }
        }
    }
}

/// `intercept + sum(coefficients[i] * x[i])`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LinearModel {
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(ArtifactError::InvalidModel(format!(
                "linear model has {} coefficients, expected {}",
                self.coefficients.len(),
                FEATURE_COUNT
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ArtifactError::InvalidModel(
                "linear model contains non-finite parameters".to_string(),
            ));
        }
        Ok(())
    }
}

impl Regressor for LinearModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(ModelError::FeatureIndex(self.coefficients.len()));
        }
        let dot: f64 = self
            .coefficients
            .iter()
            .zip(features.values())
            .map(|(c, x)| c * x)
            .sum();
        Ok(self.intercept + dot)
    }

    fn name(&self) -> &'static str {
        "linear"
    }
}

/// How tree outputs are combined
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Aggregation {
    /// Random forest: average of all trees
    Mean,
    /// Gradient boosting: `base_score + learning_rate * sum(trees)`
    Additive { base_score: f64, learning_rate: f64 },
}

/// One node of a flattened decision tree. Node 0 is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        leaf: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Walk from the root; `x[feature] <= threshold` goes left
    fn evaluate(&self, tree: usize, x: &[f64; FEATURE_COUNT]) -> Result<f64, ModelError> {
        let mut node = 0;
        loop {
            match self.nodes.get(node) {
                Some(TreeNode::Leaf { leaf }) => return Ok(*leaf),
                Some(TreeNode::Split { feature, threshold, left, right }) => {
                    let value = x.get(*feature).ok_or(ModelError::FeatureIndex(*feature))?;
                    node = if *value <= *threshold { *left } else { *right };
                }
                None => return Err(ModelError::MissingNode { tree, node }),
            }
        }
    }

    /// Children must point strictly forward, which also rules out cycles
    fn validate(&self, tree: usize) -> Result<(), ArtifactError> {
        if self.nodes.is_empty() {
            return Err(ArtifactError::InvalidModel(format!("tree {} has no nodes", tree)));
        }

        for (index, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Leaf { leaf } => {
                    if !leaf.is_finite() {
                        return Err(ArtifactError::InvalidModel(format!(
                            "tree {} node {} has a non-finite leaf",
                            tree, index
                        )));
                    }
                }
                TreeNode::Split { feature, threshold, left, right } => {
                    if *feature >= FEATURE_COUNT {
                        return Err(ArtifactError::InvalidModel(format!(
                            "tree {} node {} splits on feature {}, only {} features exist",
                            tree, index, feature, FEATURE_COUNT
                        )));
                    }
                    if threshold.is_nan() {
                        return Err(ArtifactError::InvalidModel(format!(
                            "tree {} node {} has a NaN threshold",
                            tree, index
                        )));
                    }
                    for child in [*left, *right] {
                        if child <= index || child >= self.nodes.len() {
                            return Err(ArtifactError::InvalidModel(format!(
                                "tree {} node {} has invalid child {}",
                                tree, index, child
                            )));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    pub aggregation: Aggregation,
    pub trees: Vec<DecisionTree>,
}

impl TreeEnsemble {
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.trees.is_empty() {
            return Err(ArtifactError::InvalidModel("tree ensemble has no trees".to_string()));
        }
        if let Aggregation::Additive { base_score, learning_rate } = self.aggregation {
            if !base_score.is_finite() || !learning_rate.is_finite() {
                return Err(ArtifactError::InvalidModel(
                    "boosting parameters must be finite".to_string(),
                ));
            }
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(i)?;
        }
        Ok(())
    }
}

impl Regressor for TreeEnsemble {
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        if self.trees.is_empty() {
            return Err(ModelError::Other("tree ensemble has no trees".to_string()));
        }

        let x = features.values();
        let mut total = 0.0;
        for (i, tree) in self.trees.iter().enumerate() {
            total += tree.evaluate(i, x)?;
        }

        Ok(match self.aggregation {
            Aggregation::Mean => total / self.trees.len() as f64,
            Aggregation::Additive { base_score, learning_rate } => base_score + learning_rate * total,
        })
    }

    fn name(&self) -> &'static str {
        match self.aggregation {
            Aggregation::Mean => "random_forest",
            Aggregation::Additive { .. } => "gradient_boosting",
        }
    }
}

//! Random forest of binary decision trees.

use serde::{Deserialize, Serialize};

use crate::classifier::{Classifier, check_row};
use crate::error::{ArtifactError, ModelError};

/// One node of a decision tree. Node 0 is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Routes `x[feature] <= threshold` to `left`, everything else to `right`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Positive-class fraction of the training rows that ended here.
    Leaf { leaf: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    fn validate(&self, tree: usize, n_features: usize) -> Result<(), ArtifactError> {
        if self.nodes.is_empty() {
            return Err(invalid(format!("tree {tree} has no nodes")));
        }

        let len = self.nodes.len();
        for (index, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= n_features {
                        return Err(invalid(format!(
                            "tree {tree} node {index}: feature {feature} out of range (n_features = {n_features})"
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(invalid(format!(
                            "tree {tree} node {index}: non-finite threshold {threshold}"
                        )));
                    }
                    // Children must point forward: bounds every walk and rules out cycles.
                    for child in [left, right] {
                        if child <= index || child >= len {
                            return Err(invalid(format!(
                                "tree {tree} node {index}: child {child} must be in {}..{len}",
                                index + 1
                            )));
                        }
                    }
                }
                TreeNode::Leaf { leaf } => {
                    if !leaf.is_finite() || !(0.0..=1.0).contains(&leaf) {
                        return Err(invalid(format!(
                            "tree {tree} node {index}: leaf value {leaf} not in [0, 1]"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    fn evaluate(&self, tree: usize, features: &[f64]) -> Result<f64, ModelError> {
        let mut node = 0;
        loop {
            match self.nodes.get(node) {
                Some(TreeNode::Leaf { leaf }) => return Ok(*leaf),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = features
                        .get(*feature)
                        .ok_or(ModelError::DimensionMismatch {
                            expected: feature + 1,
                            got: features.len(),
                        })?;
                    let next = if *value <= *threshold { *left } else { *right };
                    if next <= node {
                        return Err(ModelError::CorruptTree { tree, node: next });
                    }
                    node = next;
                }
                None => return Err(ModelError::CorruptTree { tree, node }),
            }
        }
    }
}

/// Averaging ensemble: the probability is the mean leaf value over all trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub n_features: usize,
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Check indices, numeric ranges and tree shape.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::InvalidModel`] describing the first problem.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.n_features == 0 {
            return Err(invalid("n_features must be at least 1".into()));
        }
        if self.trees.is_empty() {
            return Err(invalid("random forest has no trees".into()));
        }
        for (index, tree) in self.trees.iter().enumerate() {
            tree.validate(index, self.n_features)?;
        }
        Ok(())
    }
}

impl Classifier for RandomForest {
    fn kind(&self) -> &'static str {
        "random_forest"
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    #[allow(clippy::cast_precision_loss)]
    fn predict_proba(&self, features: &[f64]) -> Result<f64, ModelError> {
        check_row(self.n_features, features)?;
        let mut total = 0.0;
        for (index, tree) in self.trees.iter().enumerate() {
            total += tree.evaluate(index, features)?;
        }
        Ok(total / self.trees.len() as f64)
    }
}

fn invalid(reason: String) -> ArtifactError {
    ArtifactError::InvalidModel(reason)
}

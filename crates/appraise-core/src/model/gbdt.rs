//! Gradient-boosted tree ensemble evaluation
//!
//! Trees are stored as flat node arrays. Child indices must point forward
//! (strictly greater than the parent index), which makes every walk finite
//! and lets validation prove termination up front.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// One node of a regression tree
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Internal split: go left when `value < threshold`, else right
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Terminal leaf contributing `value` to the ensemble sum
    Leaf { value: f64 },
}

/// A single regression tree as a flat node array rooted at index 0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

impl Tree {
    /// Walk the tree for one feature vector.
    ///
    /// Indices were range-checked at load, so the walk itself is
    /// infallible.
    fn evaluate(&self, vector: &[f64]) -> f64 {
        let mut index = 0;
        loop {
            match self.nodes[index] {
                TreeNode::Leaf { value } => return value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if vector[feature] < threshold { left } else { right };
                }
            }
        }
    }

    fn validate(&self, tree_index: usize, feature_count: usize) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(ModelError::MalformedTree {
                tree: tree_index,
                reason: "tree has no nodes".to_string(),
            });
        }
        for (i, node) in self.nodes.iter().enumerate() {
            if let TreeNode::Split {
                feature,
                left,
                right,
                ..
            } = node
            {
                if *feature >= feature_count {
                    return Err(ModelError::MalformedTree {
                        tree: tree_index,
                        reason: format!(
                            "node {i} splits on feature {feature}, only {feature_count} features declared"
                        ),
                    });
                }
                for &child in [left, right] {
                    if child >= self.nodes.len() || child <= i {
                        return Err(ModelError::MalformedTree {
                            tree: tree_index,
                            reason: format!("node {i} has invalid child index {child}"),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

/// A boosted ensemble: base score plus the sum of all tree outputs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forest {
    pub base_score: f64,
    pub trees: Vec<Tree>,
}

impl Forest {
    pub fn predict(&self, vector: &[f64]) -> f64 {
        self.base_score
            + self
                .trees
                .iter()
                .map(|tree| tree.evaluate(vector))
                .sum::<f64>()
    }

    pub fn validate(&self, feature_count: usize) -> Result<()> {
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(i, feature_count)?;
        }
        Ok(())
    }
}

//! Serialized regression model bundles
//!
//! A bundle is a JSON document holding the model name, the training-order
//! feature list, and the flavor payload. The feature list is authoritative:
//! prediction builds the positional vector by looking each declared name up
//! on the [`CarFeatures`] record, so the name-to-position mapping lives in
//! exactly one artifact.
//!
//! Structural validation happens at load time. A bundle that passes
//! [`Model::load`] cannot fail mid-walk on a bad index later.

mod gbdt;
mod linear;

pub use gbdt::{Forest, Tree, TreeNode};
pub use linear::LinearModel;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::features::CarFeatures;

/// The supported model flavors
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelFlavor {
    GradientBoosting(Forest),
    Linear(LinearModel),
}

/// A loaded regression model: feature order plus flavor payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    /// Human label for the model
    pub name: String,
    /// Feature names in the order the model was trained on
    pub feature_names: Vec<String>,
    /// Flavor payload
    pub flavor: ModelFlavor,
}

impl Model {
    /// Load and validate a bundle from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let model: Model = serde_json::from_str(&raw).map_err(|source| ModelError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        model.validate()?;
        Ok(model)
    }

    /// Structural validation of the bundle.
    pub fn validate(&self) -> Result<()> {
        if self.feature_names.is_empty() {
            return Err(ModelError::EmptyFeatureList);
        }
        match &self.flavor {
            ModelFlavor::GradientBoosting(forest) => forest.validate(self.feature_names.len()),
            ModelFlavor::Linear(linear) => linear.validate(self.feature_names.len()),
        }
    }

    /// Short flavor label for status reporting.
    pub fn flavor_name(&self) -> &'static str {
        match self.flavor {
            ModelFlavor::GradientBoosting(_) => "gradient_boosting",
            ModelFlavor::Linear(_) => "linear",
        }
    }

    /// Number of trees, for gradient-boosting bundles.
    pub fn tree_count(&self) -> Option<usize> {
        match &self.flavor {
            ModelFlavor::GradientBoosting(forest) => Some(forest.trees.len()),
            ModelFlavor::Linear(_) => None,
        }
    }

    /// Build the positional feature vector in the bundle's declared order.
    pub fn feature_vector(&self, features: &CarFeatures) -> Result<Vec<f64>> {
        self.feature_names
            .iter()
            .map(|name| {
                features
                    .value_of(name)
                    .ok_or_else(|| ModelError::UnknownFeature(name.clone()))
            })
            .collect()
    }

    /// Predict a price for a feature record.
    ///
    /// The record is assumed to have passed `CarFeatures::validate` already;
    /// this only guards the model-side failure modes.
    pub fn predict(&self, features: &CarFeatures) -> Result<f64> {
        let vector = self.feature_vector(features)?;
        let prediction = match &self.flavor {
            ModelFlavor::GradientBoosting(forest) => forest.predict(&vector),
            ModelFlavor::Linear(linear) => linear.predict(&vector),
        };
        if !prediction.is_finite() {
            return Err(ModelError::NonFinitePrediction);
        }
        Ok(prediction)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Feature order matching the original training data layout.
    pub const TRAINING_ORDER: [&str; 6] = [
        "turbo",
        "airbags",
        "prod_year",
        "cylinders",
        "engine_volume",
        "mileage",
    ];

    /// A linear model over the six features with distinct weights, handy for
    /// checking that ordering flows through prediction.
    pub fn linear_model() -> Model {
        Model {
            name: "test-linear".to_string(),
            feature_names: TRAINING_ORDER.iter().map(|s| s.to_string()).collect(),
            flavor: ModelFlavor::Linear(LinearModel {
                intercept: 1000.0,
                weights: vec![500.0, 10.0, 1.0, 100.0, 2000.0, -0.01],
            }),
        }
    }

    /// A two-tree forest splitting on prod_year and turbo.
    pub fn small_forest() -> Model {
        Model {
            name: "test-forest".to_string(),
            feature_names: TRAINING_ORDER.iter().map(|s| s.to_string()).collect(),
            flavor: ModelFlavor::GradientBoosting(Forest {
                base_score: 10_000.0,
                trees: vec![
                    Tree {
                        nodes: vec![
                            // split on prod_year (index 2 in training order)
                            TreeNode::Split {
                                feature: 2,
                                threshold: 2010.0,
                                left: 1,
                                right: 2,
                            },
                            TreeNode::Leaf { value: -2000.0 },
                            TreeNode::Leaf { value: 3000.0 },
                        ],
                    },
                    Tree {
                        nodes: vec![
                            // split on turbo (index 0)
                            TreeNode::Split {
                                feature: 0,
                                threshold: 0.5,
                                left: 1,
                                right: 2,
                            },
                            TreeNode::Leaf { value: 0.0 },
                            TreeNode::Leaf { value: 1500.0 },
                        ],
                    },
                ],
            }),
        }
    }
}

//! Linear regression flavor
//!
//! Mostly useful for tests and as the simplest possible bundle payload.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Weights plus intercept over the declared feature order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub weights: Vec<f64>,
}

impl LinearModel {
    pub fn predict(&self, vector: &[f64]) -> f64 {
        self.intercept
            + self
                .weights
                .iter()
                .zip(vector)
                .map(|(w, x)| w * x)
                .sum::<f64>()
    }

    pub fn validate(&self, feature_count: usize) -> Result<()> {
        if self.weights.len() != feature_count {
            return Err(ModelError::WeightCountMismatch {
                weights: self.weights.len(),
                features: feature_count,
            });
        }
        Ok(())
    }
}

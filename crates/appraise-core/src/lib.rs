//! Appraise Core - car price prediction domain library
//!
//! This crate provides the pieces shared by the prediction service and its
//! clients:
//!
//! - **Features**: the `CarFeatures` record with its validation bounds
//! - **Model**: serialized regression model bundles (gradient-boosted trees
//!   or linear) loaded from disk and evaluated against a feature record
//! - **Error**: error types for validation, loading, and prediction
//!
//! The model bundle declares its own training-order feature list; prediction
//! builds the positional vector by looking each declared name up on the
//! record, so request field order never matters.

pub mod error;
pub mod features;
pub mod model;

pub use error::{ModelError, Result, ValidationError};
pub use features::CarFeatures;
pub use model::{Forest, LinearModel, Model, ModelFlavor, Tree, TreeNode};

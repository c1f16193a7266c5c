//! Error types for appraise-core

use thiserror::Error;

/// Result type alias for model operations
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors raised while loading or evaluating a model bundle
#[derive(Error, Debug)]
pub enum ModelError {
    /// Bundle file could not be read
    #[error("Failed to read model file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Bundle file is not valid JSON for the expected schema
    #[error("Failed to parse model file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Bundle declares no features
    #[error("Model bundle declares an empty feature list")]
    EmptyFeatureList,

    /// Bundle references a feature name the record does not have
    #[error("Model expects unknown feature: {0}")]
    UnknownFeature(String),

    /// Tree node references an out-of-range feature or child index
    #[error("Malformed tree {tree}: {reason}")]
    MalformedTree { tree: usize, reason: String },

    /// Linear weight count does not match the feature list
    #[error("Weight count {weights} does not match feature count {features}")]
    WeightCountMismatch { weights: usize, features: usize },

    /// Evaluation produced a non-finite value
    #[error("Prediction produced a non-finite value")]
    NonFinitePrediction,
}

/// A field-level bounds violation, reported before the model is invoked
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("prod_year must be between {min} and {max}, got {value}")]
    ProdYearOutOfRange { value: i32, min: i32, max: i32 },

    #[error("engine_volume must be between {min} and {max} litres, got {value}")]
    EngineVolumeOutOfRange { value: f64, min: f64, max: f64 },

    #[error("mileage must be at most {max} km, got {value}")]
    MileageOutOfRange { value: u32, max: u32 },

    #[error("cylinders must be one of {allowed:?}, got {value}")]
    InvalidCylinderCount { value: u8, allowed: &'static [u8] },

    #[error("airbags must be at most {max}, got {value}")]
    AirbagsOutOfRange { value: u8, max: u8 },

    #[error("turbo must be 0 or 1, got {value}")]
    InvalidTurboFlag { value: u8 },
}

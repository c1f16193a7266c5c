//! Appraise Server Binary
//!
//! Loads the model bundle and serves the prediction API.

use std::sync::Arc;

use appraise_core::Model;
use appraise_server::{serve, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let addr = std::env::var("APPRAISE_ADDR").unwrap_or_else(|_| "127.0.0.1:8000".to_string());
    let model_path =
        std::env::var("APPRAISE_MODEL").unwrap_or_else(|_| "models/car-price.json".to_string());

    // A model that fails to load is fatal: there is nothing to serve.
    let model = Model::load(&model_path).map_err(|e| {
        tracing::error!("Failed to load model from {}: {}", model_path, e);
        e
    })?;
    tracing::info!(
        "Loaded model '{}' ({}, {} features)",
        model.name,
        model.flavor_name(),
        model.feature_names.len()
    );

    let state = Arc::new(AppState::new(model));
    serve(&addr, state).await
}

//! Appraise Server - car price prediction API
//!
//! Thin HTTP wrapper around a loaded regression model: one prediction
//! endpoint, a welcome route, and a status route for introspection.

pub mod http;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use appraise_core::Model;

/// Shared application state
///
/// The model is loaded once at startup and never mutated, so handlers share
/// it through the `Arc` without locking.
pub struct AppState {
    pub model: Model,
}

impl AppState {
    pub fn new(model: Model) -> Self {
        Self { model }
    }
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(http::home))
        .route("/predict", post(http::predict))
        .route("/status", get(http::get_status))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the server
pub async fn serve(addr: &str, state: Arc<AppState>) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Appraise server listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use appraise_core::CarFeatures;

use crate::AppState;

/// Welcome message for the root route
pub async fn home() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Welcome to the Car Price Prediction API! Use /predict to get predictions."
    }))
}

/// Request body for the prediction endpoint.
///
/// Field names match the bundle's feature names; JSON key order is
/// irrelevant because the vector is rebuilt in the model's declared order.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub prod_year: i32,
    pub engine_volume: f64,
    pub mileage: u32,
    pub cylinders: u8,
    pub airbags: u8,
    pub turbo: u8,
}

impl From<PredictRequest> for CarFeatures {
    fn from(request: PredictRequest) -> Self {
        CarFeatures {
            prod_year: request.prod_year,
            engine_volume: request.engine_volume,
            mileage: request.mileage,
            cylinders: request.cylinders,
            airbags: request.airbags,
            turbo: request.turbo,
        }
    }
}

/// Response for a successful prediction
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub predicted_price: f64,
}

/// Predict a price for one car
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, (StatusCode, String)> {
    let features: CarFeatures = request.into();

    features
        .validate()
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    let predicted_price = state.model.predict(&features).map_err(|e| {
        tracing::error!("Prediction failed: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    tracing::debug!(
        prod_year = features.prod_year,
        mileage = features.mileage,
        predicted_price,
        "prediction served"
    );

    Ok(Json(PredictResponse { predicted_price }))
}

/// Get service status and model metadata
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "model": {
            "name": state.model.name,
            "flavor": state.model.flavor_name(),
            "feature_names": state.model.feature_names,
            "trees": state.model.tree_count(),
        }
    }))
}

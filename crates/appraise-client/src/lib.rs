//! HTTP client for the prediction API
//!
//! Wraps the two service routes behind typed calls. Response parsing is
//! tolerant: when the body is not the expected JSON shape, the client falls
//! back to scraping the first numeric literal out of the text before giving
//! up, so a slightly mangled but priced response still renders a price.

use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Client;
use thiserror::Error;

use appraise_core::CarFeatures;

lazy_static! {
    /// First numeric literal in a response body, the degraded parse path.
    static ref PRICE_PATTERN: Regex = Regex::new(r"-?\d+(?:\.\d+)?").expect("valid regex");
}

/// Errors surfaced to the form as a displayed string
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Server returned {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("Could not find a price in the response: {body}")]
    UnparseableResponse { body: String },
}

/// Client for one prediction service instance
pub struct PredictionClient {
    client: Client,
    base_url: String,
}

impl PredictionClient {
    /// Create a client for the service at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Request a price prediction for one car.
    pub async fn predict(&self, features: &CarFeatures) -> Result<f64, ClientError> {
        let response = self
            .client
            .post(format!("{}/predict", self.base_url))
            .json(features)
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;

        if !status.is_success() {
            return Err(ClientError::ServerError {
                status: status.as_u16(),
                message: body,
            });
        }

        extract_price(&body)
    }

    /// Fetch the welcome message, used as a reachability probe.
    pub async fn welcome(&self) -> Result<String, ClientError> {
        let response = self
            .client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;

        let body = response
            .text()
            .await
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;

        match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(json) => Ok(json["message"].as_str().unwrap_or(&body).to_string()),
            Err(_) => Ok(body),
        }
    }
}

/// Pull the predicted price out of a response body.
///
/// Prefers the documented `{"predicted_price": ...}` shape; falls back to
/// the first numeric literal in the text.
fn extract_price(body: &str) -> Result<f64, ClientError> {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(price) = json.get("predicted_price").and_then(|v| v.as_f64()) {
            return Ok(price);
        }
    }

    PRICE_PATTERN
        .find(body)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .ok_or_else(|| ClientError::UnparseableResponse {
            body: body.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_price_from_json() {
        assert_eq!(
            extract_price(r#"{"predicted_price": 15250.5}"#).unwrap(),
            15250.5
        );
    }

    #[test]
    fn test_extract_price_ignores_json_key_noise() {
        // The JSON path wins even when other numbers appear earlier in the text
        assert_eq!(
            extract_price(r#"{"version": 2, "predicted_price": 9000.0}"#).unwrap(),
            9000.0
        );
    }

    #[test]
    fn test_extract_price_falls_back_to_scraping() {
        assert_eq!(
            extract_price("predicted price is 12345.67 dollars").unwrap(),
            12345.67
        );
    }

    #[test]
    fn test_extract_price_scrapes_integer() {
        assert_eq!(extract_price("price: 9000").unwrap(), 9000.0);
    }

    #[test]
    fn test_extract_price_fails_without_a_number() {
        assert!(matches!(
            extract_price("no price here"),
            Err(ClientError::UnparseableResponse { .. })
        ));
    }
}

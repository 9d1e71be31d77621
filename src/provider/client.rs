//! CalorieNinjas API client
//!
//! Resolves a free-text meal description to a list of ingredient records.

use std::time::Duration;

use reqwest::{Client, ClientBuilder, StatusCode};
use thiserror::Error;

use super::types::{IngredientRecord, NutritionResponse};

/// Default lookup endpoint
const DEFAULT_BASE_URL: &str = "https://api.calorieninjas.com/v1/nutrition";

/// Request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connection timeout in seconds
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Provider error types. All are recoverable: the caller reports the
/// failure and no meal entry is recorded.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no CalorieNinjas API key configured (set CALORIE_NINJAS_API_KEY)")]
    MissingApiKey,

    #[error("nutrition lookup request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("nutrition lookup returned HTTP {0}")]
    Status(StatusCode),
}

/// Nutrition lookup client
#[derive(Debug, Clone)]
pub struct NutritionProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl NutritionProvider {
    /// Create a client for the given API key and endpoint
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// Build a client from `CALORIE_NINJAS_API_KEY` and
    /// `NUTRISMART_NUTRITION_API_URL` (endpoint override, optional)
    pub fn from_env() -> Self {
        let api_key = std::env::var("CALORIE_NINJAS_API_KEY").unwrap_or_default();
        let base_url = std::env::var("NUTRISMART_NUTRITION_API_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(api_key, base_url)
    }

    /// Whether an API key is configured
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Resolve a meal description to ingredient records.
    ///
    /// An empty result list is a valid outcome (no ingredients matched),
    /// not an error; callers decide how to surface it.
    pub async fn lookup(&self, query: &str) -> Result<Vec<IngredientRecord>, ProviderError> {
        if !self.has_api_key() {
            return Err(ProviderError::MissingApiKey);
        }

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("query", query)])
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "nutrition lookup failed");
            return Err(ProviderError::Status(status));
        }

        let body: NutritionResponse = response.json().await?;
        Ok(body.items)
    }
}

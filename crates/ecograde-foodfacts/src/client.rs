//! HTTP client for the Open Food Facts search API.
//!
//! Wraps `reqwest` with typed error handling and response normalization. The
//! search endpoint (`/cgi/search.pl`) matches by product name; we only ever
//! read the first result.

use std::time::Duration;

use reqwest::{Client, Url};

use ecograde_core::EnrichmentData;

use crate::describe::describe;
use crate::error::FoodFactsError;
use crate::types::{FoodFactsProduct, SearchResponse};

const DEFAULT_BASE_URL: &str = "https://world.openfoodfacts.org";

/// Client for the Open Food Facts REST API.
///
/// Use [`FoodFactsClient::new`] for production or
/// [`FoodFactsClient::with_base_url`] to point at a mock server in tests.
#[derive(Clone)]
pub struct FoodFactsClient {
    client: Client,
    base_url: Url,
}

impl FoodFactsClient {
    /// Creates a new client pointed at the production Open Food Facts API.
    ///
    /// # Errors
    ///
    /// Returns [`FoodFactsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, FoodFactsError> {
        Self::with_base_url(timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`FoodFactsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`FoodFactsError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, FoodFactsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // join() appends the search path instead of replacing a path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|_| FoodFactsError::InvalidBaseUrl(base_url.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Best-effort enrichment lookup for a product name.
    ///
    /// Never fails: network errors, non-2xx statuses, malformed bodies, and
    /// empty result sets all collapse to `None` (logged at `warn`/`debug`).
    /// Blank names short-circuit without a request.
    pub async fn fetch_enrichment(&self, product_name: &str) -> Option<EnrichmentData> {
        if product_name.trim().is_empty() {
            return None;
        }

        match self.search_product(product_name).await {
            Ok(Some(record)) => Some(normalize(record)),
            Ok(None) => {
                tracing::debug!(product_name, "no external record matched");
                None
            }
            Err(e) => {
                tracing::warn!(product_name, error = %e, "enrichment lookup failed");
                None
            }
        }
    }

    /// Searches for a product by name and returns the first hit, if any.
    ///
    /// # Errors
    ///
    /// - [`FoodFactsError::Http`] on network failure or non-2xx HTTP status.
    /// - [`FoodFactsError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn search_product(
        &self,
        product_name: &str,
    ) -> Result<Option<FoodFactsProduct>, FoodFactsError> {
        let url = self.build_search_url(product_name)?;

        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let envelope: SearchResponse =
            serde_json::from_str(&body).map_err(|e| FoodFactsError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;

        Ok(envelope.products.into_iter().next())
    }

    /// Builds the search URL with properly percent-encoded query parameters.
    fn build_search_url(&self, product_name: &str) -> Result<Url, FoodFactsError> {
        let mut url = self
            .base_url
            .join("cgi/search.pl")
            .map_err(|_| FoodFactsError::InvalidBaseUrl(self.base_url.to_string()))?;
        url.query_pairs_mut()
            .append_pair("search_terms", product_name)
            .append_pair("json", "1");
        Ok(url)
    }
}

/// Map a raw external record into the bounded [`EnrichmentData`] shape.
fn normalize(record: FoodFactsProduct) -> EnrichmentData {
    let description = describe(&record);
    EnrichmentData {
        product_name: record.product_name,
        eco_score: record.ecoscore_score,
        eco_grade: record.ecoscore_grade,
        packaging: record.packaging,
        labels: record.labels_tags,
        additives: u32::try_from(record.additives_tags.len()).unwrap_or(u32::MAX),
        origins: record.origins,
        description,
    }
}

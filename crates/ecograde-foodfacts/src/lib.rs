//! Best-effort Open Food Facts enrichment for product comparisons.
//!
//! The client performs a name search against the Open Food Facts API and
//! normalizes the first hit into [`ecograde_core::EnrichmentData`]. Lookups
//! are strictly optional: the public [`FoodFactsClient::fetch_enrichment`]
//! entry point swallows every failure into `None` so a slow or broken
//! upstream can never fail a comparison.

mod client;
mod describe;
mod error;
mod types;

pub use client::FoodFactsClient;
pub use error::FoodFactsError;
pub use types::{FoodFactsProduct, SearchResponse};

use serde::Deserialize;

/// Envelope returned by `GET /cgi/search.pl?...&json=1`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub products: Vec<FoodFactsProduct>,
}

/// The subset of an Open Food Facts product record we read.
///
/// The upstream schema is sparse and inconsistent across records; every field
/// is optional or defaulted so an unusual record degrades instead of failing
/// deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct FoodFactsProduct {
    pub product_name: Option<String>,
    pub ecoscore_score: Option<f64>,
    pub ecoscore_grade: Option<String>,
    pub packaging: Option<String>,
    #[serde(default)]
    pub labels_tags: Vec<String>,
    #[serde(default)]
    pub additives_tags: Vec<String>,
    pub origins: Option<String>,
}

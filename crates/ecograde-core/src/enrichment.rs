use serde::{Deserialize, Serialize};

/// Third-party sustainability metadata for a product, normalized from an
/// external lookup. Optional everywhere a comparison appears: the lookup is
/// best-effort and its absence never blocks a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentData {
    /// Name of the matched external record, which may differ from ours.
    pub product_name: Option<String>,
    pub eco_score: Option<f64>,
    /// Letter grade `a`–`e`, lowercase.
    pub eco_grade: Option<String>,
    pub packaging: Option<String>,
    /// Certification label tags, as returned by the source.
    pub labels: Vec<String>,
    /// Number of listed additives.
    pub additives: u32,
    pub origins: Option<String>,
    /// Short human-readable summary derived from the fields above.
    pub description: String,
}

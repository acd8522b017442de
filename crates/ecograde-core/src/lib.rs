use thiserror::Error;

pub mod app_config;
pub mod compare;
pub mod config;
pub mod credentials;
pub mod enrichment;
pub mod graph;
pub mod narrative;
pub mod product;
pub mod score;

pub use app_config::{AppConfig, Environment};
pub use compare::{
    compare_products, ComparisonOutcome, ExternalData, Highlights, ProductSummary,
    Recommendations, ScorePair, Summary,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use enrichment::EnrichmentData;
pub use graph::{build_comparison_graph, GraphData, GraphDataset, GRAPH_CATEGORIES};
pub use narrative::{eco_description, key_difference};
pub use product::{Product, SustainabilityAttributes};
pub use score::{score_product, ScoreResult};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

use thiserror::Error;

/// Errors returned by the Open Food Facts client.
#[derive(Debug, Error)]
pub enum FoodFactsError {
    /// Network or TLS failure from the underlying HTTP client, or a non-2xx
    /// HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured base URL could not be parsed.
    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    /// The response body could not be deserialized into the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

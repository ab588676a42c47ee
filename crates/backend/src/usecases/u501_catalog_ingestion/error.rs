use thiserror::Error;

/// Errors raised while loading the product catalog
///
/// Rows that cannot be turned into a product are not errors; they are
/// dropped by the executor.
#[derive(Debug, Error)]
pub enum IngestionError {
    #[error("Failed to fetch catalog: {0}")]
    Fetch(String),

    #[error("Catalog source responded with HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(String),
}

impl IngestionError {
    /// Network or HTTP failure while reaching the source
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, Self::Fetch(_) | Self::HttpStatus { .. })
    }
}

impl From<reqwest::Error> for IngestionError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Fetch(format!("request timed out: {}", e))
        } else {
            Self::Fetch(e.to_string())
        }
    }
}

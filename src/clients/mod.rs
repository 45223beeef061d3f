pub mod pixabay;

use crate::models::ImageResult;
use async_trait::async_trait;
use thiserror::Error;

/// Errors raised while talking to an image provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider API key is not configured")]
    MissingApiKey,

    /// The provider answered with a non-success status.
    #[error("Provider returned status {status}")]
    Status {
        status: u16,
        details: serde_json::Value,
    },

    /// No response was received.
    #[error("Provider unreachable: {0}")]
    Unreachable(String),

    #[error("Provider request failed: {0}")]
    Request(String),
}

/// An external image search service.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Whether a credential is available for outbound calls.
    fn is_configured(&self) -> bool;

    /// Runs one search and returns hits in provider order.
    async fn search_images(
        &self,
        term: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<ImageResult>, ProviderError>;
}

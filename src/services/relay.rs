//! Query relay: forwards a search to the image provider and reshapes the hits.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::clients::{ImageProvider, ProviderError};
use crate::constants::limits::RESULTS_PER_PAGE;
use crate::models::ImageResult;
use crate::services::SearchLog;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Search string is required")]
    MissingSearchString,

    #[error("Provider API key is not configured")]
    MissingApiKey,

    #[error("Provider returned status {status}")]
    Upstream {
        status: u16,
        details: serde_json::Value,
    },

    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("Relay failed: {0}")]
    Internal(String),
}

impl From<ProviderError> for RelayError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::MissingApiKey => Self::MissingApiKey,
            ProviderError::Status { status, details } => Self::Upstream { status, details },
            ProviderError::Unreachable(msg) => Self::Unavailable(msg),
            ProviderError::Request(msg) => Self::Internal(msg),
        }
    }
}

pub struct RelayService {
    provider: Arc<dyn ImageProvider>,
    search_log: Arc<dyn SearchLog>,
}

impl RelayService {
    #[must_use]
    pub fn new(provider: Arc<dyn ImageProvider>, search_log: Arc<dyn SearchLog>) -> Self {
        Self {
            provider,
            search_log,
        }
    }

    /// Searches the provider for `search_string` on `page`.
    ///
    /// The term is logged on a detached task before the provider is called;
    /// a logging failure never changes the outcome.
    pub async fn search(
        &self,
        search_string: Option<&str>,
        page: u32,
    ) -> Result<Vec<ImageResult>, RelayError> {
        let term = search_string
            .filter(|s| !s.is_empty())
            .ok_or(RelayError::MissingSearchString)?;

        if !self.provider.is_configured() {
            return Err(RelayError::MissingApiKey);
        }

        self.record_in_background(term);

        let results = self
            .provider
            .search_images(term, page, RESULTS_PER_PAGE)
            .await?;

        debug!(term = %term, page, hits = results.len(), "Relayed image search");
        Ok(results)
    }

    fn record_in_background(&self, term: &str) {
        let search_log = Arc::clone(&self.search_log);
        let term = term.to_string();

        tokio::spawn(async move {
            if let Err(e) = search_log.record(&term).await {
                metrics::counter!("search_log_failures_total").increment(1);
                warn!("Error saving search term: {}", e);
            }
        });
    }
}

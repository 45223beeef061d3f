//! Domain service for the search log.
//!
//! Every accepted search appends one record; `/recent/` reads the newest ones.

use crate::constants::limits::RECENT_SEARCHES_LIMIT;
use crate::db::Store;
use crate::models::SearchRecord;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors specific to search log operations.
#[derive(Debug, Error)]
pub enum SearchLogError {
    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for SearchLogError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<sea_orm::DbErr> for SearchLogError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

#[async_trait]
pub trait SearchLog: Send + Sync {
    /// Appends `term` stamped with the current time.
    async fn record(&self, term: &str) -> Result<(), SearchLogError> {
        self.record_at(term, Utc::now()).await
    }

    /// Appends `term` with an explicit timestamp.
    async fn record_at(&self, term: &str, when: DateTime<Utc>) -> Result<(), SearchLogError>;

    /// Returns at most ten records, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`SearchLogError::Database`] when the store cannot be read.
    /// No partial results are returned.
    async fn recent(&self) -> Result<Vec<SearchRecord>, SearchLogError>;
}

pub struct SeaOrmSearchLog {
    store: Store,
}

impl SeaOrmSearchLog {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SearchLog for SeaOrmSearchLog {
    async fn record_at(&self, term: &str, when: DateTime<Utc>) -> Result<(), SearchLogError> {
        self.store.add_search_term(term, when).await?;
        Ok(())
    }

    async fn recent(&self) -> Result<Vec<SearchRecord>, SearchLogError> {
        Ok(self.store.recent_search_terms(RECENT_SEARCHES_LIMIT).await?)
    }
}

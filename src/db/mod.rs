use crate::models::SearchRecord;
use anyhow::Result;
use chrono::{DateTime, Utc};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    fn search_log_repo(&self) -> repositories::search_log::SearchLogRepository {
        repositories::search_log::SearchLogRepository::new(self.conn.clone())
    }

    pub async fn add_search_term(&self, term: &str, when: DateTime<Utc>) -> Result<()> {
        self.search_log_repo().add(term, when).await
    }

    pub async fn recent_search_terms(&self, limit: u64) -> Result<Vec<SearchRecord>> {
        self.search_log_repo().recent(limit).await
    }

    pub async fn purge_search_terms_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64> {
        self.search_log_repo().purge_older_than(cutoff).await
    }
}

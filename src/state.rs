use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::clients::ImageProvider;
use crate::clients::pixabay::PixabayClient;
use crate::config::Config;
use crate::db::Store;
use crate::services::{RelayService, SeaOrmSearchLog, SearchLog};

/// Build the HTTP client shared by provider calls.
/// No request timeout is set: the transport default applies.
fn build_shared_http_client() -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("pixrelay/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub search_log: Arc<dyn SearchLog>,

    pub relay: Arc<RelayService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        if let Some(days) = config.search_log.retention_days {
            let cutoff = Utc::now() - chrono::Duration::days(i64::from(days));
            let removed = store.purge_search_terms_older_than(cutoff).await?;
            info!("Purged {} search records older than {} days", removed, days);
        }

        if !config.has_api_key() {
            warn!("PIXABAY_API_KEY is not set; searches will fail until it is configured");
        }

        let http_client = build_shared_http_client()?;
        let provider = Arc::new(PixabayClient::with_shared_client(
            http_client,
            &config.provider,
        )) as Arc<dyn ImageProvider>;

        Ok(Self::with_services(config, store, provider))
    }

    /// Wires the services around an existing store and provider.
    #[must_use]
    pub fn with_services(config: Config, store: Store, provider: Arc<dyn ImageProvider>) -> Self {
        let search_log =
            Arc::new(SeaOrmSearchLog::new(store.clone())) as Arc<dyn SearchLog>;
        let relay = Arc::new(RelayService::new(provider, search_log.clone()));

        Self {
            config: Arc::new(config),
            store,
            search_log,
            relay,
        }
    }
}

use std::sync::Arc;

use crate::config::{AppConfig, StorageBackend};
use crate::database::{DatabaseManager, MemoryProfileStore, PgProfileStore, ProfileStore};
use crate::services::GithubClient;

/// Shared per-process state handed to every handler
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<dyn ProfileStore>,
    pub github: GithubClient,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn ProfileStore>) -> anyhow::Result<Arc<Self>> {
        let github = GithubClient::new(config.github.clone())?;

        Ok(Arc::new(Self {
            config,
            store,
            github,
        }))
    }

    /// Build state with the store selected by `database.backend`
    pub async fn from_config(config: AppConfig) -> anyhow::Result<Arc<Self>> {
        let store: Arc<dyn ProfileStore> = match config.database.backend {
            StorageBackend::Postgres => {
                let pool = DatabaseManager::connect(&config.database).await?;
                Arc::new(PgProfileStore::new(pool))
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory profile store; data is lost on restart");
                Arc::new(MemoryProfileStore::new())
            }
        };

        Self::new(config, store)
    }
}

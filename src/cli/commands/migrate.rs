use crate::cli::{utils::output_success, OutputFormat};
use crate::config::{AppConfig, StorageBackend};
use crate::database::DatabaseManager;

pub async fn handle(config: AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    if config.database.backend != StorageBackend::Postgres {
        anyhow::bail!("migrations require DATABASE_URL (current backend: {:?})", config.database.backend);
    }

    let pool = DatabaseManager::connect(&config.database).await?;
    DatabaseManager::migrate(&pool).await?;
    pool.close().await;

    output_success(&output_format, "Database migrations applied", None)
}

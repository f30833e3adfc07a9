// Bootstrap utilities for binary initialization

use crate::config::{Settings, StorageBackend};
use crate::db::repositories::{EventRepository, MemoryEventRepository, PgEventRepository};
use crate::db::DbPool;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// The storage chosen by configuration, plus the pool to close on shutdown
pub struct Storage {
    pub repository: Arc<dyn EventRepository>,
    pub pool: Option<DbPool>,
}

/// Initialize database pool and apply migrations when configured to
///
/// # Errors
/// Returns error if database pool initialization or migration fails
#[tracing::instrument(skip(settings))]
pub async fn init_database_pool(settings: &Settings) -> Result<DbPool> {
    info!("Initializing database pool");

    let db_pool = DbPool::new(&settings.database)
        .await
        .context("Failed to initialize database pool")?;

    if settings.database.run_migrations {
        db_pool
            .migrate()
            .await
            .context("Failed to run database migrations")?;
    } else {
        info!("Database migrations skipped");
    }

    info!("Database pool initialized");
    Ok(db_pool)
}

/// Build the event repository for the configured storage backend
///
/// # Errors
/// Returns error if the PostgreSQL backend cannot be initialized
#[tracing::instrument(skip(settings), fields(backend = ?settings.storage.backend))]
pub async fn init_storage(settings: &Settings) -> Result<Storage> {
    match settings.storage.backend {
        StorageBackend::Postgres => {
            let pool = init_database_pool(settings).await?;
            Ok(Storage {
                repository: Arc::new(PgEventRepository::new(pool.clone())),
                pool: Some(pool),
            })
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; events are lost on restart");
            Ok(Storage {
                repository: Arc::new(MemoryEventRepository::new()),
                pool: None,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_backend_needs_no_database() {
        let mut settings = Settings::default();
        settings.storage.backend = StorageBackend::Memory;
        settings.database.url = String::new();

        let storage = init_storage(&settings).await.unwrap();
        assert!(storage.pool.is_none());
        assert!(storage.repository.health_check().await.is_ok());
    }
}

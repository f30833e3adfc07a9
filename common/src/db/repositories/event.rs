// Event repository: the storage seam of the event service

use async_trait::async_trait;
use tracing::instrument;
use uuid::Uuid;

use super::queries::event_queries;
use crate::db::DbPool;
use crate::errors::DatabaseError;
use crate::models::{Event, EventDateRow};
use crate::validation::ValidEvent;

/// Persistence operations needed by the event service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Store an event and all of its dates atomically, returning the
    /// generated identifier
    async fn insert_event(&self, event: &ValidEvent) -> Result<Uuid, DatabaseError>;

    /// Load an event with its dates
    async fn find_event(&self, id: Uuid) -> Result<Option<Event>, DatabaseError>;

    /// Check that the backing store is reachable
    async fn health_check(&self) -> Result<(), DatabaseError>;
}

/// PostgreSQL-backed event repository
#[derive(Debug, Clone)]
pub struct PgEventRepository {
    pool: DbPool,
}

impl PgEventRepository {
    /// Create a new PgEventRepository
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    #[instrument(skip(self, event), fields(event_name = %event.name(), date_count = event.dates().len()))]
    async fn insert_event(&self, event: &ValidEvent) -> Result<Uuid, DatabaseError> {
        let mut tx = self
            .pool
            .pool()
            .begin()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        let id: Uuid = sqlx::query_scalar(event_queries::INSERT_EVENT)
            .bind(event.name())
            .bind(event.start_min())
            .bind(event.end_min())
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(event_queries::INSERT_DATES)
            .bind(id)
            .bind(event.dates().to_vec())
            .execute(&mut *tx)
            .await?;

        // Dropping the transaction on any error above rolls it back
        tx.commit()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        tracing::info!(event_id = %id, "Event created");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn find_event(&self, id: Uuid) -> Result<Option<Event>, DatabaseError> {
        let rows = sqlx::query_as::<_, EventDateRow>(event_queries::SELECT_WITH_DATES)
            .bind(id)
            .fetch_all(self.pool.pool())
            .await?;

        tracing::debug!(rows = rows.len(), "Loaded event rows");
        Ok(Event::from_rows(rows))
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.pool.health_check().await
    }
}

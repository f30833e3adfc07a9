// In-memory event repository for local runs and tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::event::EventRepository;
use crate::errors::DatabaseError;
use crate::models::Event;
use crate::validation::ValidEvent;

/// Event repository that keeps everything in a process-local map.
/// Contents are lost on restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryEventRepository {
    events: Arc<RwLock<HashMap<Uuid, Event>>>,
}

impl MemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored events
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

#[async_trait]
impl EventRepository for MemoryEventRepository {
    async fn insert_event(&self, event: &ValidEvent) -> Result<Uuid, DatabaseError> {
        let id = Uuid::new_v4();
        let stored = Event {
            id,
            name: event.name().to_string(),
            start_min: event.start_min(),
            end_min: event.end_min(),
            dates: event.dates().to_vec(),
        };

        self.events.write().await.insert(id, stored);
        tracing::info!(event_id = %id, "Event created in memory store");
        Ok(id)
    }

    async fn find_event(&self, id: Uuid) -> Result<Option<Event>, DatabaseError> {
        Ok(self.events.read().await.get(&id).cloned())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewEvent;
    use crate::validation::validate_event;
    use chrono::NaiveDate;

    fn valid_event() -> ValidEvent {
        validate_event(NewEvent {
            name: "Offsite".to_string(),
            start_min: 8,
            end_min: 18,
            dates: vec![NaiveDate::from_ymd_opt(2024, 9, 2).unwrap()],
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_insert_then_find() {
        let repo = MemoryEventRepository::new();
        let id = repo.insert_event(&valid_event()).await.unwrap();

        let event = repo.find_event(id).await.unwrap().unwrap();
        assert_eq!(event.id, id);
        assert_eq!(event.name, "Offsite");
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_find_unknown_returns_none() {
        let repo = MemoryEventRepository::new();
        assert!(repo.find_event(Uuid::new_v4()).await.unwrap().is_none());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_each_insert_gets_a_fresh_id() {
        let repo = MemoryEventRepository::new();
        let a = repo.insert_event(&valid_event()).await.unwrap();
        let b = repo.insert_event(&valid_event()).await.unwrap();
        assert_ne!(a, b);
    }
}

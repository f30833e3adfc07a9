// Event service: create and read scheduling polls

use std::fmt;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::db::repositories::EventRepository;
use crate::errors::EventError;
use crate::models::{CreatedEvent, Event, NewEvent};
use crate::telemetry::{record_event_created, record_event_lookup, record_validation_failure};
use crate::validation::validate_event;

/// Stateless request/response operations over an [`EventRepository`]
#[derive(Clone)]
pub struct EventService {
    repo: Arc<dyn EventRepository>,
}

impl fmt::Debug for EventService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventService").finish_non_exhaustive()
    }
}

impl EventService {
    pub fn new(repo: Arc<dyn EventRepository>) -> Self {
        Self { repo }
    }

    /// Validate the input and persist the event with all of its dates.
    ///
    /// Nothing is written when validation fails.
    #[instrument(skip(self, input), fields(event_name = %input.name))]
    pub async fn create_event(&self, input: NewEvent) -> Result<CreatedEvent, EventError> {
        let event = validate_event(input).map_err(|e| {
            tracing::warn!(error = %e, "Rejected event creation");
            record_validation_failure();
            e
        })?;

        let id = self.repo.insert_event(&event).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to store event");
            e
        })?;

        record_event_created(event.dates().len());
        tracing::info!(event_id = %id, date_count = event.dates().len(), "Event created");

        Ok(CreatedEvent { id: id.to_string() })
    }

    /// Read an event back by its identifier.
    ///
    /// An identifier that is not well formed cannot match any event and is
    /// reported as not found.
    #[instrument(skip(self))]
    pub async fn get_event(&self, id: &str) -> Result<Event, EventError> {
        let Ok(uuid) = Uuid::parse_str(id.trim()) else {
            record_event_lookup("not_found");
            return Err(EventError::NotFound(id.to_string()));
        };

        match self.repo.find_event(uuid).await {
            Ok(Some(event)) => {
                record_event_lookup("found");
                Ok(event)
            }
            Ok(None) => {
                record_event_lookup("not_found");
                tracing::debug!(event_id = %uuid, "Event not found");
                Err(EventError::NotFound(id.to_string()))
            }
            Err(e) => {
                record_event_lookup("error");
                tracing::error!(error = %e, event_id = %uuid, "Failed to load event");
                Err(e.into())
            }
        }
    }

    /// Check that the backing store is reachable
    pub async fn health_check(&self) -> Result<(), EventError> {
        self.repo.health_check().await.map_err(EventError::from)
    }
}

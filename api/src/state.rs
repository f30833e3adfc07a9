use metrics_exporter_prometheus::PrometheusHandle;
use std::fmt;
use std::sync::Arc;

use common::config::Settings;
use common::service::EventService;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub events: EventService,
    pub config: Arc<Settings>,
    pub metrics: Option<PrometheusHandle>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("events", &self.events)
            .field("config", &self.config)
            .field("metrics_enabled", &self.metrics.is_some())
            .finish()
    }
}

impl AppState {
    /// Create a new AppState instance
    pub fn new(events: EventService, config: Settings) -> Self {
        Self {
            events,
            config: Arc::new(config),
            metrics: None,
        }
    }

    /// Attach the Prometheus handle used by `/metrics`
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::state::AppState;

/// Prometheus metrics endpoint
#[tracing::instrument(skip(state))]
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, "Metrics are disabled".to_string()),
    }
}

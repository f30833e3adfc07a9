// Remote-procedure endpoints: event.createEvent and event.getEvent

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::Deserialize;

use crate::handlers::{ErrorResponse, SuccessResponse};
use crate::state::AppState;
use common::models::{CreatedEvent, Event, NewEvent};

/// Query string of `event.getEvent`
#[derive(Debug, Deserialize)]
pub struct GetEventParams {
    pub id: String,
}

/// `POST /api/event.createEvent`
#[tracing::instrument(skip(state, payload))]
pub async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<NewEvent>, JsonRejection>,
) -> Result<SuccessResponse<CreatedEvent>, ErrorResponse> {
    let Json(input) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Malformed createEvent body");
        ErrorResponse::new("validation_error", rejection.body_text())
    })?;

    let created = state.events.create_event(input).await?;
    Ok(SuccessResponse::new(created))
}

/// `GET /api/event.getEvent?id=...`
#[tracing::instrument(skip(state, params))]
pub async fn get_event(
    State(state): State<AppState>,
    params: Result<Query<GetEventParams>, QueryRejection>,
) -> Result<SuccessResponse<Event>, ErrorResponse> {
    let Query(params) = params.map_err(|rejection| {
        ErrorResponse::new("validation_error", rejection.body_text())
    })?;

    let event = state.events.get_event(&params.id).await?;
    Ok(SuccessResponse::new(event))
}

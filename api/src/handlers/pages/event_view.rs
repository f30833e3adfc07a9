// Per-event view: a loading shell plus the HTMX-loaded panel

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use common::display::{format_month_day, time_window_label};
use common::models::Event;
use serde::Serialize;
use tera::Context;

use super::shared_utils::{render, setup_htmx_context, GENERIC_FAILURE};
use crate::handlers::ErrorResponse;
use crate::state::AppState;

/// Event data shaped for the panel template
#[derive(Debug, Serialize)]
struct EventPanel {
    name: String,
    time_window: String,
    dates: Vec<String>,
}

impl From<&Event> for EventPanel {
    fn from(event: &Event) -> Self {
        Self {
            name: event.name.clone(),
            time_window: time_window_label(event.start_min, event.end_min),
            dates: event.dates.iter().map(|d| format_month_day(*d)).collect(),
        }
    }
}

/// `GET /:id`: page shell that loads the panel
#[tracing::instrument]
pub async fn event_view_page(Path(id): Path<String>) -> Result<Html<String>, ErrorResponse> {
    let mut context = Context::new();
    context.insert("event_id", &id);
    Ok(Html(render("event_view.html", &context)?))
}

/// `GET /events/:id/panel`: event name, window and dates, or the generic
/// failure message. Not-found and every other failure look the same.
#[tracing::instrument(skip(state, headers))]
pub async fn event_panel(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let mut context = Context::new();

    let (status, content, full) = match state.events.get_event(&id).await {
        Ok(event) => {
            context.insert("event", &EventPanel::from(&event));
            (StatusCode::OK, "event_panel.html", "event_panel_page.html")
        }
        Err(e) => {
            let status = ErrorResponse::from(e).status();
            context.insert("message", GENERIC_FAILURE);
            (status, "event_error.html", "event_error_page.html")
        }
    };

    let template = setup_htmx_context(&mut context, &headers, content, full);
    match render(template, &context) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => e.into_response(),
    }
}

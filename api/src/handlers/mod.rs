pub mod events;
pub mod health;
pub mod metrics;
pub mod pages;

// Common response types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::errors::EventError;
use serde::Serialize;

/// Standard API error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    pub trace_id: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            trace_id: uuid::Uuid::new_v4().to_string(),
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn status(&self) -> StatusCode {
        match self.error.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "validation_error" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<EventError> for ErrorResponse {
    fn from(err: EventError) -> Self {
        match err {
            EventError::Validation(e) => {
                let details = serde_json::to_value(e.details()).unwrap_or_default();
                ErrorResponse::new("validation_error", e.to_string()).with_details(details)
            }
            EventError::NotFound(id) => {
                ErrorResponse::new("not_found", format!("Event not found: {}", id))
            }
            EventError::Database(e) => {
                let response = ErrorResponse::new("internal_error", "Something went wrong");
                // Store details stay in the logs, keyed by the trace id
                tracing::error!(error = %e, trace_id = %response.trace_id, "Storage failure");
                response
            }
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Standard API success response
#[derive(Debug, Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

impl<T: Serialize> IntoResponse for SuccessResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the main application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    // Remote-procedure surface
    let rpc_routes = Router::new()
        .route(
            "/api/event.createEvent",
            post(handlers::events::create_event),
        )
        .route("/api/event.getEvent", get(handlers::events::get_event));

    // Pages (HTMX)
    let page_routes = Router::new()
        .route("/", get(handlers::pages::create_form_page))
        .route("/events", post(handlers::pages::create_event_submit))
        .route("/events/:id/panel", get(handlers::pages::event_panel))
        .route("/:id", get(handlers::pages::event_view_page));

    let ops_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::metrics_handler));

    Router::new()
        .merge(rpc_routes)
        .merge(page_routes)
        .merge(ops_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(timeout))
                .layer(cors),
        )
        .with_state(state)
}

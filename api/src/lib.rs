// HTTP surface of the Meet Sync event service

pub mod handlers;
pub mod routes;
pub mod state;
pub mod templates;

pub use routes::create_router;
pub use state::AppState;

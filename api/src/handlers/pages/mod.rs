// Server-rendered pages (Tera + HTMX)

mod create_form;
mod event_view;
mod shared_utils;

pub use create_form::{create_event_submit, create_form_page};
pub use event_view::{event_panel, event_view_page};
pub use shared_utils::GENERIC_FAILURE;

// Repository layer for database operations

pub mod event;
pub mod memory;
pub mod queries;

pub use event::{EventRepository, PgEventRepository};
pub use memory::MemoryEventRepository;

#[cfg(test)]
pub use event::MockEventRepository;

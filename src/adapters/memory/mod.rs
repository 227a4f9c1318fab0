//! In-memory adapters for tests and local development.

mod schedule_store;

pub use schedule_store::InMemoryScheduleStore;

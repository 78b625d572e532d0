//! In-memory adapters for tests and store-less deployments.

mod task;

pub use task::InMemoryTaskRepository;

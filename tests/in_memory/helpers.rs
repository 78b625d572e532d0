//! Shared test helpers for in-memory integration tests.

pub use crate::test_helpers::SteppingClock;
use rstest::fixture;
use std::sync::Arc;
use taskdesk::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::Task,
    services::{TaskService, TaskServiceResult},
    validation::TaskPayload,
};

/// Service type used across in-memory tests.
pub type MemoryService = TaskService<InMemoryTaskRepository, SteppingClock>;

/// Provides a service over a fresh in-memory store.
#[fixture]
pub fn service() -> MemoryService {
    TaskService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(SteppingClock::default()),
    )
}

/// Creates a pending, low-priority task with the given title.
///
/// # Errors
///
/// Returns the service error if creation fails.
pub async fn create_titled(service: &MemoryService, title: &str) -> TaskServiceResult<Task> {
    let payload = TaskPayload::new()
        .with("title", title)
        .with("priority", "low")
        .with("status", "pending");
    service.create(&payload).await
}

/// Builds a payload from a JSON object literal.
pub fn payload(value: serde_json::Value) -> TaskPayload {
    TaskPayload::from_json(value).expect("payload should be a JSON object")
}

//! Repository port for task persistence and lookup.

use super::TaskFilter;
use crate::task::domain::{NewTask, Task, TaskChanges, TaskId, TaskStatistics};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// The repository is the only component that touches stored records.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task and returns it with its assigned identifier.
    ///
    /// Identifiers are never reused, including those of deleted tasks.
    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<Task>;

    /// Applies `changes` to the stored task as of `now` and returns the
    /// stored result.
    ///
    /// The read and the write happen as one step, so concurrent writers never
    /// overwrite each other's fields.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(
        &self,
        id: TaskId,
        changes: &TaskChanges,
        now: DateTime<Utc>,
    ) -> TaskRepositoryResult<Task>;

    /// Applies `changes` to every existing task among `ids` as one atomic
    /// step and returns the stored results.
    ///
    /// Identifiers with no stored task are skipped. `ids` must not repeat.
    /// The order of the returned tasks is unspecified.
    async fn update_many(
        &self,
        ids: &[TaskId],
        changes: &TaskChanges,
        now: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<Task>>;

    /// Removes a task permanently.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns tasks matching `filter`, newest first.
    ///
    /// Ties on `created_at` are broken by the higher identifier first.
    async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>>;

    /// Counts tasks across the whole store.
    async fn statistics(&self) -> TaskRepositoryResult<TaskStatistics>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

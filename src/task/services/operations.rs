//! Service layer for task creation, updates, queries, and bulk writes.

use crate::task::{
    domain::{NewTask, Priority, Status, Task, TaskChanges, TaskId, TaskStatistics},
    ports::{TaskFilter, TaskRepository, TaskRepositoryError},
    validation::{FieldErrors, TaskPayload, ValidationMode, validate_payload},
};
use mockable::Clock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// No task exists with the identifier.
    #[error("task with id {0} not found")]
    NotFound(TaskId),
    /// One or more fields failed validation.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(TaskRepositoryError),
}

impl From<FieldErrors> for TaskServiceError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<TaskRepositoryError> for TaskServiceError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            other @ TaskRepositoryError::Persistence(_) => Self::Repository(other),
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// How an update treats fields missing from the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateMode {
    /// Required fields must be supplied.
    Full,
    /// Only supplied fields are validated and changed.
    Partial,
}

impl UpdateMode {
    const fn validation_mode(self) -> ValidationMode {
        match self {
            Self::Full => ValidationMode::Replace,
            Self::Partial => ValidationMode::Partial,
        }
    }
}

/// Query parameters for listing tasks.
///
/// Values are kept as received; unknown choices match nothing rather than
/// failing, and empty strings are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTasksRequest {
    status: Option<String>,
    priority: Option<String>,
}

impl ListTasksRequest {
    /// Creates a request listing every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Filters by priority.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Converts the request into a filter.
    ///
    /// Returns `None` when a supplied value names no known choice, meaning
    /// no task can match.
    fn to_filter(&self) -> Option<TaskFilter> {
        let mut filter = TaskFilter::all();
        if let Some(raw) = non_empty(self.status.as_deref()) {
            filter = filter.with_status(Status::try_from(raw).ok()?);
        }
        if let Some(raw) = non_empty(self.priority.as_deref()) {
            filter = filter.with_priority(Priority::try_from(raw).ok()?);
        }
        Some(filter)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|raw| !raw.is_empty())
}

/// Task operations orchestration service.
///
/// The only component that mutates the store.
pub struct TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Validates `payload` and stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] when any field is invalid or
    /// the title is missing, and [`TaskServiceError::Repository`] when the
    /// store rejects the write.
    pub async fn create(&self, payload: &TaskPayload) -> TaskServiceResult<Task> {
        let changes = validate_payload(payload, ValidationMode::Create)?;
        let draft = NewTask::from_changes(changes, &*self.clock).map_err(FieldErrors::from)?;
        let task = self.repository.insert(&draft).await?;
        log::info!("created task {}", task.id());
        Ok(task)
    }

    /// Fetches one task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist.
    pub async fn retrieve(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::NotFound(id))
    }

    /// Validates `payload` and applies it to an existing task.
    ///
    /// Existence is checked before validation, so an unknown id reports
    /// [`TaskServiceError::NotFound`] even for an invalid payload.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist and
    /// [`TaskServiceError::Validation`] when the payload is invalid for
    /// `mode`.
    pub async fn update(
        &self,
        id: TaskId,
        payload: &TaskPayload,
        mode: UpdateMode,
    ) -> TaskServiceResult<Task> {
        self.retrieve(id).await?;
        let changes = validate_payload(payload, mode.validation_mode())?;
        let task = self
            .repository
            .update(id, &changes, self.clock.utc())
            .await?;
        log::info!("updated task {id} ({mode:?})");
        Ok(task)
    }

    /// Removes a task permanently.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist,
    /// including when it was already deleted.
    pub async fn delete(&self, id: TaskId) -> TaskServiceResult<()> {
        self.repository.delete(id).await?;
        log::info!("deleted task {id}");
        Ok(())
    }

    /// Lists tasks matching every supplied filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn list(&self, request: &ListTasksRequest) -> TaskServiceResult<Vec<Task>> {
        let Some(filter) = request.to_filter() else {
            return Ok(Vec::new());
        };
        Ok(self.repository.list(&filter).await?)
    }

    /// Lists high-priority tasks that are pending or in progress, newest
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn high_priority(&self) -> TaskServiceResult<Vec<Task>> {
        Ok(self
            .repository
            .list(&TaskFilter::open_high_priority())
            .await?)
    }

    /// Counts tasks across the whole store.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn statistics(&self) -> TaskServiceResult<TaskStatistics> {
        Ok(self.repository.statistics().await?)
    }

    /// Sets `status` on every existing task in `ids` as one atomic batch.
    ///
    /// Unknown ids, including tasks deleted while the batch runs, are skipped.
    /// Returns the number of tasks updated.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the batch cannot be
    /// written; no task is changed in that case.
    pub async fn bulk_update_status(
        &self,
        ids: &[TaskId],
        status: Status,
    ) -> TaskServiceResult<usize> {
        let tasks = self
            .apply_in_order(ids, &TaskChanges::default().with_status(status))
            .await?;
        log::info!("set status {status} on {} task(s)", tasks.len());
        Ok(tasks.len())
    }

    /// Applies `payload` as a partial update to every existing task in `ids`
    /// as one atomic batch.
    ///
    /// Unknown ids are skipped and duplicates collapse. Updated tasks are
    /// returned in the order their ids first appear.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] when the payload is invalid,
    /// in which case no task is changed.
    pub async fn bulk_update(
        &self,
        ids: &[TaskId],
        payload: &TaskPayload,
    ) -> TaskServiceResult<Vec<Task>> {
        let changes = validate_payload(payload, ValidationMode::Partial)?;
        let tasks = self.apply_in_order(ids, &changes).await?;
        log::info!("bulk updated {} task(s)", tasks.len());
        Ok(tasks)
    }

    async fn apply_in_order(
        &self,
        ids: &[TaskId],
        changes: &TaskChanges,
    ) -> TaskServiceResult<Vec<Task>> {
        let unique = dedupe_ids(ids);
        if unique.is_empty() {
            return Ok(Vec::new());
        }

        let mut updated: HashMap<TaskId, Task> = self
            .repository
            .update_many(&unique, changes, self.clock.utc())
            .await?
            .into_iter()
            .map(|task| (task.id(), task))
            .collect();
        Ok(unique.iter().filter_map(|id| updated.remove(id)).collect())
    }
}

/// Removes repeated ids, keeping first occurrences in order.
fn dedupe_ids(ids: &[TaskId]) -> Vec<TaskId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

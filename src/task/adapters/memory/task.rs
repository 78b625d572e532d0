//! In-memory task repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::task::{
    domain::{NewTask, Task, TaskChanges, TaskId, TaskStatistics},
    ports::{TaskFilter, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Identifiers come from a monotonically increasing sequence starting at 1.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, Task>,
    last_id: i64,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(err: &PoisonError<T>) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        let id = TaskId::new(state.last_id + 1);
        state.last_id = id.value();

        let stored = Task::from_new(id, task.clone());
        state.tasks.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        id: TaskId,
        changes: &TaskChanges,
        now: DateTime<Utc>,
    ) -> TaskRepositoryResult<Task> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        task.apply_at(changes.clone(), now);
        Ok(task.clone())
    }

    async fn update_many(
        &self,
        ids: &[TaskId],
        changes: &TaskChanges,
        now: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        let mut updated = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(task) = state.tasks.get_mut(id) {
                task.apply_at(changes.clone(), now);
                updated.push(task.clone());
            }
        }
        Ok(updated)
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect();
        tasks.sort_by(Task::cmp_newest_first);
        Ok(tasks)
    }

    async fn statistics(&self) -> TaskRepositoryResult<TaskStatistics> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(TaskStatistics::from_tasks(state.tasks.values()))
    }
}

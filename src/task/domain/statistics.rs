//! Aggregate counts over the task store.

use super::{Priority, Status, Task};
use serde::{Deserialize, Serialize};

/// Counts of tasks by status, plus the number of high-priority tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatistics {
    /// All tasks.
    pub total: u64,
    /// Tasks with status `pending`.
    pub pending: u64,
    /// Tasks with status `in_progress`.
    pub in_progress: u64,
    /// Tasks with status `completed`.
    pub completed: u64,
    /// Tasks with priority `high`, regardless of status.
    pub high_priority: u64,
}

impl TaskStatistics {
    /// Counts the given tasks.
    #[must_use]
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        tasks.into_iter().fold(Self::default(), |mut stats, task| {
            stats.record(task);
            stats
        })
    }

    /// Adds one task to the counts.
    pub const fn record(&mut self, task: &Task) {
        self.total += 1;
        match task.status() {
            Status::Pending => self.pending += 1,
            Status::InProgress => self.in_progress += 1,
            Status::Completed => self.completed += 1,
        }
        if matches!(task.priority(), Priority::High) {
            self.high_priority += 1;
        }
    }
}

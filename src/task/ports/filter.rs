//! Equality filters for task listings.

use crate::task::domain::{Priority, Status, Task};

/// Conjunction of equality constraints applied to a task listing.
///
/// An empty status set matches every status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    statuses: Vec<Status>,
    priority: Option<Priority>,
}

impl TaskFilter {
    /// Creates a filter matching every task.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Matches high-priority tasks that still need work.
    #[must_use]
    pub fn open_high_priority() -> Self {
        Self::all()
            .with_statuses(Status::OPEN)
            .with_priority(Priority::High)
    }

    /// Restricts the filter to one status.
    #[must_use]
    pub fn with_status(self, status: Status) -> Self {
        self.with_statuses([status])
    }

    /// Restricts the filter to any of the given statuses.
    #[must_use]
    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = Status>) -> Self {
        self.statuses = statuses.into_iter().collect();
        self
    }

    /// Restricts the filter to one priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Returns the accepted statuses; empty means any.
    #[must_use]
    pub fn statuses(&self) -> &[Status] {
        &self.statuses
    }

    /// Returns the required priority, if any.
    #[must_use]
    pub const fn priority(&self) -> Option<Priority> {
        self.priority
    }

    /// Returns `true` when the task satisfies every constraint.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        let status_matches = self.statuses.is_empty() || self.statuses.contains(&task.status());
        let priority_matches = self.priority.is_none_or(|priority| priority == task.priority());
        status_matches && priority_matches
    }
}

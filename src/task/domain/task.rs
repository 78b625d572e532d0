//! Task aggregate root and its write-side companions.

use super::{Priority, Status, TaskDomainError, TaskId, TaskTitle};
use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Task aggregate root.
///
/// Serializes to exactly `id`, `title`, `description`, `priority`, `status`,
/// `created_at`, `updated_at`, and `due_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: String,
    priority: Priority,
    status: Status,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    due_date: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: String,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted status.
    pub status: Status,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest write timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted due date, if any.
    pub due_date: Option<DateTime<Utc>>,
}

impl Task {
    /// Builds the stored task once the store has assigned an identifier.
    #[must_use]
    pub fn from_new(id: TaskId, task: NewTask) -> Self {
        Self {
            id,
            title: task.title,
            description: task.description,
            priority: task.priority,
            status: task.status,
            created_at: task.created_at,
            updated_at: task.created_at,
            due_date: task.due_date,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            priority: data.priority,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
            due_date: data.due_date,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the task description, empty when none was given.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the task status.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest write timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Applies validated field changes and refreshes `updated_at`.
    ///
    /// Fields absent from `changes` keep their current values.
    pub fn apply(&mut self, changes: TaskChanges, clock: &impl Clock) {
        self.apply_at(changes, clock.utc());
    }

    /// Applies validated field changes as of `now`.
    ///
    /// Repositories call this while holding the record, so the changes land on
    /// the latest stored state.
    pub fn apply_at(&mut self, changes: TaskChanges, now: DateTime<Utc>) {
        let TaskChanges {
            title,
            description,
            priority,
            status,
            due_date,
        } = changes;

        if let Some(new_title) = title {
            self.title = new_title;
        }
        if let Some(new_description) = description {
            self.description = new_description;
        }
        if let Some(new_priority) = priority {
            self.priority = new_priority;
        }
        if let Some(new_status) = status {
            self.status = new_status;
        }
        if let Some(new_due_date) = due_date {
            self.due_date = new_due_date.map(truncate_to_micros);
        }
        self.touch(now);
    }

    /// Sets the status and refreshes `updated_at`.
    pub fn set_status(&mut self, status: Status, clock: &impl Clock) {
        self.status = status;
        self.touch(clock.utc());
    }

    /// Orders tasks newest first, breaking ties on the higher identifier.
    #[must_use]
    pub fn cmp_newest_first(a: &Self, b: &Self) -> Ordering {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    }

    /// Updates the `updated_at` timestamp without letting it move backwards.
    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = truncate_to_micros(now).max(self.updated_at);
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title.as_str())
    }
}

/// Validated task awaiting a store-assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: TaskTitle,
    description: String,
    priority: Priority,
    status: Status,
    due_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl NewTask {
    /// Creates a task draft with default description, priority, and status.
    #[must_use]
    pub fn new(title: TaskTitle, clock: &impl Clock) -> Self {
        Self {
            title,
            description: String::new(),
            priority: Priority::default(),
            status: Status::default(),
            due_date: None,
            created_at: truncate_to_micros(clock.utc()),
        }
    }

    /// Builds a draft from validated changes, filling in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::MissingTitle`] when `changes` carries no
    /// title.
    pub fn from_changes(changes: TaskChanges, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let TaskChanges {
            title,
            description,
            priority,
            status,
            due_date,
        } = changes;
        let draft = Self::new(title.ok_or(TaskDomainError::MissingTitle)?, clock);

        Ok(Self {
            description: description.unwrap_or_default(),
            priority: priority.unwrap_or_default(),
            status: status.unwrap_or_default(),
            due_date: due_date.flatten().map(truncate_to_micros),
            ..draft
        })
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(truncate_to_micros(due_date));
        self
    }

    /// Returns the draft title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the draft description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the draft priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the draft status.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Returns the draft due date.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the creation timestamp, also used as the first `updated_at`.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Validated field changes for a task write.
///
/// `None` means "leave unchanged". `due_date` distinguishes clearing the
/// date (`Some(None)`) from not touching it (`None`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    /// New title.
    pub title: Option<TaskTitle>,
    /// New description.
    pub description: Option<String>,
    /// New priority.
    pub priority: Option<Priority>,
    /// New status.
    pub status: Option<Status>,
    /// New due date, or `Some(None)` to clear it.
    pub due_date: Option<Option<DateTime<Utc>>>,
}

impl TaskChanges {
    /// Sets the title change.
    #[must_use]
    pub fn with_title(mut self, title: TaskTitle) -> Self {
        self.title = Some(title);
        self
    }

    /// Sets the status change.
    #[must_use]
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the priority change.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Returns `true` when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.due_date.is_none()
    }
}

/// Drops sub-microsecond precision, matching what `PostgreSQL` stores.
#[must_use]
pub fn truncate_to_micros(at: DateTime<Utc>) -> DateTime<Utc> {
    at.trunc_subsecs(6)
}

//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Priority choice.
    pub priority: String,
    /// Status choice.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last write timestamp.
    pub updated_at: DateTime<Utc>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
}

/// Insert model for task records. The identifier comes from the sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Priority choice.
    pub priority: String,
    /// Status choice.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last write timestamp.
    pub updated_at: DateTime<Utc>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
}

/// Update model for task records. `created_at` is never rewritten.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Priority choice.
    pub priority: String,
    /// Status choice.
    pub status: String,
    /// Last write timestamp.
    pub updated_at: DateTime<Utc>,
    /// Optional due date; `None` clears the column.
    pub due_date: Option<DateTime<Utc>>,
}

/// Aggregate counts row.
#[derive(Debug, Clone, QueryableByName)]
pub struct StatisticsRow {
    /// All tasks.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub total: i64,
    /// Pending tasks.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub pending: i64,
    /// In-progress tasks.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub in_progress: i64,
    /// Completed tasks.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub completed: i64,
    /// High-priority tasks.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub high_priority: i64,
}

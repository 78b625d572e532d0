//! Request and response bodies specific to the HTTP surface.

use crate::task::{
    domain::{Task, TaskId},
    services::ListTasksRequest,
    validation::{FieldError, FieldErrors, TaskPayload},
};
use actix_web::web;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Payload key carrying the ids of a bulk update.
pub const TASK_IDS: &str = "task_ids";

/// Query string accepted by the list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListQuery {
    /// Status to match.
    pub status: Option<String>,
    /// Priority to match.
    pub priority: Option<String>,
}

impl TaskListQuery {
    /// Reads the filters from a raw query string.
    ///
    /// A repeated key keeps its last value. Unknown keys are ignored.
    #[must_use]
    pub fn parse(query_string: &str) -> Self {
        let pairs = web::Query::<Vec<(String, String)>>::from_query(query_string)
            .map(web::Query::into_inner)
            .unwrap_or_default();

        pairs
            .into_iter()
            .fold(Self::default(), |mut query, (key, value)| {
                match key.as_str() {
                    "status" => query.status = Some(value),
                    "priority" => query.priority = Some(value),
                    _ => {}
                }
                query
            })
    }
}

impl From<TaskListQuery> for ListTasksRequest {
    fn from(query: TaskListQuery) -> Self {
        let mut request = Self::new();
        if let Some(status) = query.status {
            request = request.with_status(status);
        }
        if let Some(priority) = query.priority {
            request = request.with_priority(priority);
        }
        request
    }
}

/// Body returned by a successful bulk update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkUpdateResponse {
    /// Number of tasks changed.
    pub updated_count: usize,
    /// The changed tasks.
    pub tasks: Vec<Task>,
}

impl From<Vec<Task>> for BulkUpdateResponse {
    fn from(tasks: Vec<Task>) -> Self {
        Self {
            updated_count: tasks.len(),
            tasks,
        }
    }
}

/// Body returned by the simplified create endpoint.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct SimpleCreateResponse {
    #[serde(flatten)]
    pub(crate) task: Task,
    pub(crate) message: &'static str,
}

/// Separates the ids of a bulk update from the fields to apply.
///
/// An absent `task_ids` key yields an empty batch.
///
/// # Errors
///
/// Returns a `task_ids` entry when the value is not a list of integers.
pub fn split_bulk_payload(
    mut payload: TaskPayload,
) -> Result<(Vec<TaskId>, TaskPayload), FieldErrors> {
    let ids = match payload.take(TASK_IDS) {
        None => Vec::new(),
        Some(Value::Null) => {
            return Err(FieldErrors::single(TASK_IDS, FieldError::Null.to_string()));
        }
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_i64().map(TaskId::new))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| FieldErrors::single(TASK_IDS, "A valid integer is required."))?,
        Some(other) => {
            return Err(FieldErrors::single(
                TASK_IDS,
                format!(
                    "Expected a list of items but got type \"{}\".",
                    crate::task::validation::json_type_name(&other)
                ),
            ));
        }
    };
    Ok((ids, payload))
}

/// Describes the API for the index endpoint.
#[must_use]
pub fn api_info_body() -> Value {
    json!({
        "message": "Task Management API",
        "version": "1.0",
        "endpoints": {
            "GET /api/tasks/": "List all tasks",
            "POST /api/tasks/": "Create a new task",
            "GET /api/tasks/{id}/": "Get specific task",
            "PUT /api/tasks/{id}/": "Update specific task (full)",
            "PATCH /api/tasks/{id}/": "Partially update specific task",
            "DELETE /api/tasks/{id}/": "Delete specific task",
            "GET /api/tasks/high_priority/": "List open high priority tasks",
            "GET /api/tasks/statistics/": "Get task statistics",
            "POST /api/tasks/bulk_update/": "Update several tasks at once",
            "POST /api/tasks/simple_create/": "Create a task with a confirmation message"
        },
        "filters": {
            "status": "pending, in_progress, completed",
            "priority": "low, medium, high"
        }
    })
}

//! HTTP surface for the task API.
//!
//! Handlers translate requests into [`crate::task::services::TaskService`]
//! calls and shape responses. Every failure is converted to a status code
//! and a JSON body at this boundary; nothing here is retried.

mod error;
mod handlers;
mod routes;
mod types;

pub use error::ApiError;
pub use routes::configure;
pub use types::{BulkUpdateResponse, TASK_IDS, TaskListQuery, api_info_body, split_bulk_payload};

//! Application services for task operations.

mod operations;

pub use operations::{
    ListTasksRequest, TaskService, TaskServiceError, TaskServiceResult, UpdateMode,
};

//! Domain model for the task entity.
//!
//! The domain owns field constraints, defaults, and timestamp rules for task
//! records while leaving persistence and transport concerns to adapters.

mod choices;
mod error;
mod ids;
mod statistics;
mod task;

pub use choices::{Priority, Status};
pub use error::{ParsePriorityError, ParseStatusError, TaskDomainError};
pub use ids::{TaskId, TaskTitle};
pub use statistics::TaskStatistics;
pub use task::{NewTask, PersistedTaskData, Task, TaskChanges, truncate_to_micros};

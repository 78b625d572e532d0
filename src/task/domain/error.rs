//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing or changing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The title is absent where one is required.
    #[error("This field is required.")]
    MissingTitle,

    /// The title is empty after trimming.
    #[error("Title cannot be empty")]
    EmptyTitle,

    /// The trimmed title exceeds the character limit.
    #[error("Ensure this field has no more than {max} characters.")]
    TitleTooLong {
        /// Maximum number of characters allowed.
        max: usize,
        /// Number of characters supplied.
        actual: usize,
    },

    /// The priority value is not one of the known choices.
    #[error(transparent)]
    InvalidPriority(#[from] ParsePriorityError),

    /// The status value is not one of the known choices.
    #[error(transparent)]
    InvalidStatus(#[from] ParseStatusError),

    /// The due date is not an RFC 3339 timestamp.
    #[error("Datetime has wrong format. Use RFC 3339, e.g. 2026-10-18T09:30:00Z.")]
    InvalidDueDate(String),
}

impl TaskDomainError {
    /// Returns the name of the task field the error applies to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::MissingTitle | Self::EmptyTitle | Self::TitleTooLong { .. } => "title",
            Self::InvalidPriority(_) => "priority",
            Self::InvalidStatus(_) => "status",
            Self::InvalidDueDate(_) => "due_date",
        }
    }
}

/// Error returned while parsing a priority choice.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("\"{0}\" is not a valid choice. Priority must be one of: low, medium, high")]
pub struct ParsePriorityError(pub String);

/// Error returned while parsing a status choice.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("\"{0}\" is not a valid choice. Status must be one of: pending, in_progress, completed")]
pub struct ParseStatusError(pub String);

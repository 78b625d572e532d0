//! Validation of incoming task payloads.
//!
//! A single validator serves both the service layer and the HTTP layer so the
//! two can never disagree about what a valid task write looks like. Payloads
//! are loose JSON objects; validation turns them into [`TaskChanges`] or a
//! per-field error map.

mod errors;
mod payload;
pub mod rules;

pub use errors::{FieldError, FieldErrors, NON_FIELD_ERRORS};
pub use payload::TaskPayload;
pub(crate) use payload::json_type_name;

use crate::task::domain::TaskChanges;

/// Field names accepted in write payloads.
pub mod fields {
    /// Task title.
    pub const TITLE: &str = "title";
    /// Task description.
    pub const DESCRIPTION: &str = "description";
    /// Task priority.
    pub const PRIORITY: &str = "priority";
    /// Task status.
    pub const STATUS: &str = "status";
    /// Task due date.
    pub const DUE_DATE: &str = "due_date";
}

/// Which fields a payload must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationMode {
    /// New record: required fields must be present, others take defaults.
    Create,
    /// Full update: required fields must be present.
    Replace,
    /// Partial update: only supplied fields are checked.
    Partial,
}

impl ValidationMode {
    const fn requires_title(self) -> bool {
        matches!(self, Self::Create | Self::Replace)
    }
}

/// Validates a payload and normalizes its values.
///
/// Read-only fields (`id`, `created_at`, `updated_at`) and unknown keys are
/// ignored. Every failing field is reported, not just the first.
///
/// # Errors
///
/// Returns [`FieldErrors`] keyed by field name when any supplied field is
/// invalid or a required field is missing.
pub fn validate_payload(
    payload: &TaskPayload,
    mode: ValidationMode,
) -> Result<TaskChanges, FieldErrors> {
    let mut errors = FieldErrors::new();

    let title = match payload.get(fields::TITLE) {
        Some(value) => collect(&mut errors, fields::TITLE, rules::title(value)),
        None if mode.requires_title() => {
            errors.add(fields::TITLE, FieldError::Required.to_string());
            None
        }
        None => None,
    };
    let description = payload
        .get(fields::DESCRIPTION)
        .and_then(|value| collect(&mut errors, fields::DESCRIPTION, rules::description(value)));
    let priority = payload
        .get(fields::PRIORITY)
        .and_then(|value| collect(&mut errors, fields::PRIORITY, rules::priority(value)));
    let status = payload
        .get(fields::STATUS)
        .and_then(|value| collect(&mut errors, fields::STATUS, rules::status(value)));
    let due_date = payload
        .get(fields::DUE_DATE)
        .and_then(|value| collect(&mut errors, fields::DUE_DATE, rules::due_date(value)));

    errors.into_result(TaskChanges {
        title,
        description,
        priority,
        status,
        due_date,
    })
}

fn collect<T>(errors: &mut FieldErrors, field: &str, result: Result<T, FieldError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            errors.add(field, err.to_string());
            None
        }
    }
}

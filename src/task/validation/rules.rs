//! Individual field rules.
//!
//! Each rule checks one JSON value and returns the normalized domain value.

use super::FieldError;
use crate::task::domain::{Priority, Status, TaskDomainError, TaskTitle, truncate_to_micros};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

/// Validates and trims a title.
///
/// # Errors
///
/// Returns [`FieldError`] for null or non-string values and for titles that
/// are blank or too long.
pub fn title(value: &Value) -> Result<TaskTitle, FieldError> {
    Ok(TaskTitle::new(require_str(value)?)?)
}

/// Validates and trims a description. Blank descriptions are allowed.
///
/// # Errors
///
/// Returns [`FieldError`] for null or non-string values.
pub fn description(value: &Value) -> Result<String, FieldError> {
    Ok(require_str(value)?.trim().to_owned())
}

/// Validates a priority choice.
///
/// # Errors
///
/// Returns [`FieldError`] for null or non-string values and for unknown
/// choices.
pub fn priority(value: &Value) -> Result<Priority, FieldError> {
    let raw = require_str(value)?;
    Priority::try_from(raw).map_err(|err| TaskDomainError::from(err).into())
}

/// Validates a status choice.
///
/// # Errors
///
/// Returns [`FieldError`] for null or non-string values and for unknown
/// choices.
pub fn status(value: &Value) -> Result<Status, FieldError> {
    let raw = require_str(value)?;
    Status::try_from(raw).map_err(|err| TaskDomainError::from(err).into())
}

/// Validates an optional due date.
///
/// Accepts RFC 3339 timestamps and offset-less `YYYY-MM-DDTHH:MM:SS[.f]`
/// values, which are read as UTC. `null` clears the date. Digits beyond
/// microseconds are dropped.
///
/// # Errors
///
/// Returns [`FieldError`] for non-string values and unparseable timestamps.
pub fn due_date(value: &Value) -> Result<Option<DateTime<Utc>>, FieldError> {
    let raw = match value {
        Value::Null => return Ok(None),
        Value::String(raw) => raw.trim(),
        _ => return Err(invalid_due_date(value.to_string())),
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(truncate_to_micros(parsed.with_timezone(&Utc))));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Some(truncate_to_micros(naive.and_utc())))
        .map_err(|_| invalid_due_date(raw.to_owned()))
}

fn require_str(value: &Value) -> Result<&str, FieldError> {
    match value {
        Value::String(raw) => Ok(raw),
        Value::Null => Err(FieldError::Null),
        _ => Err(FieldError::NotAString),
    }
}

fn invalid_due_date(raw: String) -> FieldError {
    TaskDomainError::InvalidDueDate(raw).into()
}

//! Errors raised at the HTTP boundary and their response bodies.

use crate::task::{
    ports::TaskRepositoryError,
    services::TaskServiceError,
    validation::FieldErrors,
};
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::{Value, json};
use thiserror::Error;

/// Request failure, carrying what is needed to build the response body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No task with the requested id.
    #[error("Not found.")]
    NotFound,

    /// The route exists but not for this method.
    #[error("Method \"{0}\" not allowed.")]
    MethodNotAllowed(String),

    /// A write did not declare a JSON content type.
    #[error("Unsupported media type \"{0}\" in request.")]
    UnsupportedMediaType(String),

    /// The body is not valid JSON.
    #[error("JSON parse error - {0}")]
    MalformedJson(String),

    /// Create payload rejected; echoes the data received.
    #[error("Validation failed")]
    CreateRejected {
        /// Per-field messages.
        errors: FieldErrors,
        /// The payload as received.
        received_data: Value,
    },

    /// Simplified create rejected; echoes the data received.
    #[error("Task creation failed")]
    SimpleCreateRejected {
        /// Description of the failure.
        error: String,
        /// The payload as received.
        received_data: Value,
    },

    /// Update payload rejected.
    #[error("{0}")]
    InvalidFields(FieldErrors),

    /// Bulk update payload rejected; no task was changed.
    #[error("Bulk update failed")]
    BulkRejected(FieldErrors),

    /// The store failed.
    #[error("A server error occurred.")]
    Internal(#[source] TaskRepositoryError),
}

impl ApiError {
    /// Maps service errors for endpoints whose validation failures are
    /// reported as a bare field-error map.
    pub(crate) fn from_service(err: TaskServiceError) -> Self {
        match err {
            TaskServiceError::NotFound(_) => Self::NotFound,
            TaskServiceError::Validation(errors) => Self::InvalidFields(errors),
            TaskServiceError::Repository(source) => Self::internal(source),
        }
    }

    /// Wraps a store failure, logging it once.
    pub(crate) fn internal(source: TaskRepositoryError) -> Self {
        log::error!("task store failure: {source}");
        Self::Internal(source)
    }

    fn body(&self) -> Value {
        match self {
            Self::CreateRejected {
                errors,
                received_data,
            } => json!({
                "errors": errors,
                "received_data": received_data,
                "message": self.to_string(),
            }),
            Self::SimpleCreateRejected {
                error,
                received_data,
            } => json!({
                "error": error,
                "received_data": received_data,
                "message": self.to_string(),
            }),
            Self::InvalidFields(errors) => json!(errors),
            Self::BulkRejected(errors) => json!({
                "errors": errors,
                "message": self.to_string(),
            }),
            Self::NotFound
            | Self::MethodNotAllowed(_)
            | Self::UnsupportedMediaType(_)
            | Self::MalformedJson(_)
            | Self::Internal(_) => json!({ "detail": self.to_string() }),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::MalformedJson(_)
            | Self::CreateRejected { .. }
            | Self::SimpleCreateRejected { .. }
            | Self::InvalidFields(_)
            | Self::BulkRejected(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.body())
    }
}

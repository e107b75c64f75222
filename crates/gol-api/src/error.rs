//! Error types for the board API.
//!
//! [`ApiError`] unifies all failure modes into a single enum that
//! can be converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation. Every
//! error body has the same shape:
//!
//! ```json
//! { "message": "...", "errors": ["..."], "timestamp": "2026-01-01T00:00:00Z" }
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use gol_core::ProcessError;
use serde::Serialize;
use validator::ValidationErrors;

/// Message used for every 400 response; the details go in `errors`.
const VALIDATION_MESSAGE: &str = "One or more validation errors occurred.";

/// Errors that can occur in the board API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request was malformed or out of range.
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// The requested board does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The request was valid but the board could not satisfy it.
    #[error("{0}")]
    Unprocessable(String),

    /// A dependency needed for the request is not available right now.
    #[error("{0}")]
    Unavailable(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// A validation error with a single message.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Validation(vec![message.into()])
    }

    /// HTTP status for this error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ProcessError> for ApiError {
    fn from(err: ProcessError) -> Self {
        match err {
            ProcessError::NotFound { .. } => Self::NotFound(err.to_string()),
            ProcessError::NonConvergence { .. } => Self::Unprocessable(err.to_string()),
            ProcessError::Cancelled => {
                Self::Unavailable("The server is shutting down; try again later.".to_owned())
            }
            ProcessError::InvalidInput(message) => Self::Validation(vec![message]),
            ProcessError::Store(source) => Self::Internal(source.to_string()),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map_or_else(|| format!("{field} is invalid."), ToString::to_string)
                })
            })
            .collect();
        messages.sort();
        Self::Validation(messages)
    }
}

/// JSON body of an error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    errors: Vec<String>,
    timestamp: DateTime<Utc>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (message, errors) = match self {
            Self::Validation(errors) => (VALIDATION_MESSAGE.to_owned(), errors),
            Self::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                ("An unexpected error occurred.".to_owned(), Vec::new())
            }
            Self::NotFound(message) | Self::Unprocessable(message) | Self::Unavailable(message) => {
                (message, Vec::new())
            }
        };

        let body = ErrorBody {
            message,
            errors,
            timestamp: Utc::now(),
        };

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use gol_types::BoardId;

    use super::*;

    #[test]
    fn process_errors_map_to_statuses() {
        let not_found = ApiError::from(ProcessError::NotFound {
            board_id: BoardId::new(),
        });
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let stuck = ApiError::from(ProcessError::NonConvergence { iterations: 9 });
        assert_eq!(stuck.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            stuck.to_string(),
            "After 9 iterations, the board did not go to conclusion."
        );

        let cancelled = ApiError::from(ProcessError::Cancelled);
        assert_eq!(cancelled.status(), StatusCode::SERVICE_UNAVAILABLE);

        let store = ApiError::from(ProcessError::Store(gol_core::StoreError::Backend(
            "down".to_owned(),
        )));
        assert_eq!(store.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_input_is_a_validation_error() {
        let err = ApiError::from(ProcessError::InvalidInput("cells missing".to_owned()));
        assert!(matches!(err, ApiError::Validation(ref msgs) if msgs == &["cells missing"]));
    }
}

//! Contact error types with HTTP status code mapping.
//!
//! [`ContactError`] is the central error type for the service. Each variant
//! maps to a specific HTTP status code and to the JSON acknowledgment shape
//! shared with successful submissions.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::api::dto::StatusResponse;

/// Public message for bodies that are not a JSON object.
pub const MALFORMED_REQUEST_MESSAGE: &str = "Request body must be a JSON object.";

/// Public message for submissions missing a required field.
pub const VALIDATION_FAILED_MESSAGE: &str =
    "Please make sure your name, email and message are all filled in.";

/// Public message for storage faults.
pub const PERSISTENCE_ERROR_MESSAGE: &str =
    "We could not save your message right now, please try again later.";

/// Server-side error enum with HTTP status code mapping.
///
/// | Variant            | HTTP Status               |
/// |--------------------|---------------------------|
/// | `MalformedRequest` | 400 Bad Request           |
/// | `ValidationFailed` | 400 Bad Request           |
/// | `PersistenceError` | 500 Internal Server Error |
///
/// The `Display` output carries internal detail and is meant for logs.
/// Clients only ever see [`ContactError::public_message`].
#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    /// Body is not well-formed JSON, or not the expected object shape.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// A required field is missing, empty, or over its length limit.
    #[error("validation failed: {0}")]
    ValidationFailed(String),

    /// Storage fault; the unit of work was rolled back.
    #[error("persistence error: {0}")]
    PersistenceError(String),
}

impl ContactError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MalformedRequest(_) | Self::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            Self::PersistenceError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the generic, client-facing message for this variant.
    #[must_use]
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::MalformedRequest(_) => MALFORMED_REQUEST_MESSAGE,
            Self::ValidationFailed(_) => VALIDATION_FAILED_MESSAGE,
            Self::PersistenceError(_) => PERSISTENCE_ERROR_MESSAGE,
        }
    }
}

impl From<sqlx::Error> for ContactError {
    fn from(err: sqlx::Error) -> Self {
        Self::PersistenceError(err.to_string())
    }
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = StatusResponse::error(self.public_message());
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_bad_request() {
        assert_eq!(
            ContactError::MalformedRequest("eof".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ContactError::ValidationFailed("name".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn persistence_error_maps_to_internal_server_error() {
        let err = ContactError::PersistenceError("disk full".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn public_message_hides_internal_detail() {
        let err = ContactError::PersistenceError("relation \"messages\" is locked".to_string());
        assert!(err.to_string().contains("locked"));
        assert!(!err.public_message().contains("locked"));
    }

    #[test]
    fn sqlx_errors_become_persistence_errors() {
        let err = ContactError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, ContactError::PersistenceError(_)));
    }

    #[tokio::test]
    async fn into_response_writes_status_and_json_body() {
        let response = ContactError::ValidationFailed("email".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
            panic!("body should be readable");
        };
        let Ok(body) = serde_json::from_slice::<serde_json::Value>(&bytes) else {
            panic!("body should be json");
        };
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], VALIDATION_FAILED_MESSAGE);
    }
}

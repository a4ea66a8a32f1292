//! Contact form request and acknowledgment DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for `POST /api/contact`.
///
/// Every field is optional at the wire level so that a missing key, a
/// `null` and an empty string all reach validation and are rejected the
/// same way. Unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ContactRequest {
    /// Sender name (required, max 100 chars).
    #[serde(default)]
    #[schema(example = "Alice")]
    pub name: Option<String>,
    /// Sender email (required, max 120 chars).
    #[serde(default)]
    #[schema(example = "a@example.com")]
    pub email: Option<String>,
    /// Subject line (optional, max 200 chars).
    #[serde(default)]
    #[schema(example = "Hi")]
    pub subject: Option<String>,
    /// Message body (required).
    #[serde(default)]
    #[schema(example = "Hello there")]
    pub message: Option<String>,
}

/// Outcome discriminator of every contact response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    /// The submission was stored.
    Success,
    /// The submission was rejected or could not be stored.
    Error,
}

/// JSON acknowledgment returned for both successes and failures.
///
/// ```json
/// { "status": "error", "message": "Request body must be a JSON object." }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    /// `"success"` or `"error"`.
    pub status: ResponseStatus,
    /// Human-readable message.
    pub message: String,
}

impl StatusResponse {
    /// Builds a success acknowledgment.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: message.into(),
        }
    }

    /// Builds an error acknowledgment.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: message.into(),
        }
    }
}

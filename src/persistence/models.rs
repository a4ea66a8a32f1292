//! Database models for stored contact messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::MessageId;

/// Raw column tuple returned by `INSERT ... RETURNING` on every backend.
pub(crate) type MessageRow = (i64, String, String, Option<String>, String, DateTime<Utc>);

/// A stored row from the `messages` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMessage {
    /// Auto-increment row ID.
    pub id: MessageId,
    /// Sender name.
    pub name: String,
    /// Sender email address.
    pub email: String,
    /// Optional subject line; empty submissions are stored as `NULL`.
    pub subject: Option<String>,
    /// Message body.
    pub message: String,
    /// Server-side creation timestamp, filled by the column default.
    pub timestamp: DateTime<Utc>,
}

impl From<MessageRow> for StoredMessage {
    fn from((id, name, email, subject, message, timestamp): MessageRow) -> Self {
        Self {
            id: MessageId::new(id),
            name,
            email,
            subject,
            message,
            timestamp,
        }
    }
}

//! Type-safe message identifier.
//!
//! [`MessageId`] is a newtype around the store-generated surrogate key so
//! that row identifiers cannot be confused with other integers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Surrogate key of a stored contact message.
///
/// Always assigned by the storage layer on insert (auto-increment), never
/// derived from submitted data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(i64);

impl MessageId {
    /// Wraps a raw row identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw row identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for MessageId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl From<MessageId> for i64 {
    fn from(id: MessageId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_plain_integer() {
        assert_eq!(MessageId::new(42).to_string(), "42");
    }

    #[test]
    fn serializes_transparently() {
        let json = serde_json::to_string(&MessageId::new(7)).ok();
        assert_eq!(json.as_deref(), Some("7"));
    }

    #[test]
    fn ordering_follows_raw_value() {
        assert!(MessageId::new(1) < MessageId::new(2));
        assert_eq!(i64::from(MessageId::from(9)), 9);
    }
}

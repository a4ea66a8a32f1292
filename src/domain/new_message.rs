//! Validated contact submission, ready to be persisted.

use crate::error::ContactError;

/// Maximum length of `name`, in characters.
pub const NAME_MAX_CHARS: usize = 100;
/// Maximum length of `email`, in characters.
pub const EMAIL_MAX_CHARS: usize = 120;
/// Maximum length of `subject`, in characters.
pub const SUBJECT_MAX_CHARS: usize = 200;

/// A contact message that passed validation but has not been stored yet.
///
/// The identifier and timestamp are absent on purpose: both are generated
/// by the storage layer when the row is inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    name: String,
    email: String,
    subject: Option<String>,
    message: String,
}

impl NewMessage {
    /// Validates raw submitted fields.
    ///
    /// `name`, `email` and `message` must be present and non-empty; `None`
    /// and `""` are treated the same. An empty `subject` is stored as
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns [`ContactError::ValidationFailed`] when a required field is
    /// missing or empty, or when any field exceeds its length limit.
    pub fn new(
        name: Option<String>,
        email: Option<String>,
        subject: Option<String>,
        message: Option<String>,
    ) -> Result<Self, ContactError> {
        let (Some(name), Some(email), Some(message)) =
            (non_empty(name), non_empty(email), non_empty(message))
        else {
            return Err(ContactError::ValidationFailed(
                "name, email and message are required".to_string(),
            ));
        };
        let subject = non_empty(subject);

        check_len("name", &name, NAME_MAX_CHARS)?;
        check_len("email", &email, EMAIL_MAX_CHARS)?;
        if let Some(subject) = &subject {
            check_len("subject", subject, SUBJECT_MAX_CHARS)?;
        }

        Ok(Self {
            name,
            email,
            subject,
            message,
        })
    }

    /// Sender name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sender email address, as submitted.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Optional subject line.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Message body.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn check_len(field: &str, value: &str, max: usize) -> Result<(), ContactError> {
    if value.chars().count() > max {
        return Err(ContactError::ValidationFailed(format!(
            "{field} exceeds {max} characters"
        )));
    }
    Ok(())
}

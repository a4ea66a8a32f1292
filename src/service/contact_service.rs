//! Contact service: validates submissions and hands them to storage.

use crate::api::dto::ContactRequest;
use crate::domain::NewMessage;
use crate::error::ContactError;
use crate::persistence::{MessageStore, StoredMessage};

/// Orchestration layer for contact submissions.
///
/// Owns the [`MessageStore`] handle injected at startup. Every submission
/// follows the same sequence: validate -> insert (one transaction) -> log.
#[derive(Debug, Clone)]
pub struct ContactService {
    store: MessageStore,
}

impl ContactService {
    /// Creates a new `ContactService`.
    #[must_use]
    pub fn new(store: MessageStore) -> Self {
        Self { store }
    }

    /// Returns a reference to the inner [`MessageStore`].
    #[must_use]
    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    /// Validates and persists one contact submission.
    ///
    /// # Errors
    ///
    /// Returns [`ContactError::ValidationFailed`] if a required field is
    /// missing or empty, and [`ContactError::PersistenceError`] if the row
    /// could not be committed. Nothing is stored in either case.
    pub async fn submit(&self, request: ContactRequest) -> Result<StoredMessage, ContactError> {
        let record = NewMessage::new(
            request.name,
            request.email,
            request.subject,
            request.message,
        )
        .inspect_err(|err| tracing::warn!(reason = %err, "contact submission rejected"))?;

        let stored = self
            .store
            .insert(&record)
            .await
            .inspect_err(|err| tracing::error!(error = %err, "failed to store contact message"))?;

        tracing::info!(message_id = %stored.id, "contact message stored");
        Ok(stored)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::config::ContactConfig;

    async fn make_service() -> ContactService {
        let config = ContactConfig {
            connection_target: "sqlite::memory:".to_string(),
            ..ContactConfig::default()
        };
        let Ok(store) = MessageStore::connect(&config).await else {
            panic!("store should open");
        };
        let Ok(()) = store.ensure_schema().await else {
            panic!("schema creation failed");
        };
        ContactService::new(store)
    }

    fn request(name: &str, email: &str, subject: Option<&str>, message: &str) -> ContactRequest {
        ContactRequest {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            subject: subject.map(str::to_string),
            message: Some(message.to_string()),
        }
    }

    #[tokio::test]
    async fn submit_stores_valid_message() {
        let service = make_service().await;
        let result = service
            .submit(request("Alice", "a@example.com", Some("Hi"), "Hello there"))
            .await;

        let Ok(stored) = result else {
            panic!("submission should succeed");
        };
        assert_eq!(stored.name, "Alice");
        assert_eq!(stored.subject.as_deref(), Some("Hi"));
        assert!(matches!(service.store().count().await, Ok(1)));
    }

    #[tokio::test]
    async fn submit_rejects_empty_name_without_storing() {
        let service = make_service().await;
        let result = service.submit(request("", "a@x.com", None, "hi")).await;

        assert!(matches!(result, Err(ContactError::ValidationFailed(_))));
        assert!(matches!(service.store().count().await, Ok(0)));
    }

    #[tokio::test]
    async fn submit_rejects_absent_message() {
        let service = make_service().await;
        let req = ContactRequest {
            message: None,
            ..request("Al", "a@x.com", None, "unused")
        };
        let result = service.submit(req).await;

        assert!(matches!(result, Err(ContactError::ValidationFailed(_))));
        assert!(matches!(service.store().count().await, Ok(0)));
    }

    #[tokio::test]
    async fn submit_reports_persistence_failure() {
        let service = make_service().await;
        let MessageStore::Sqlite(sqlite) = service.store() else {
            panic!("expected sqlite store");
        };
        let Ok(_) = sqlx::query("DROP TABLE messages")
            .execute(sqlite.pool())
            .await
        else {
            panic!("drop failed");
        };

        let result = service.submit(request("Al", "a@x.com", None, "hi")).await;
        assert!(matches!(result, Err(ContactError::PersistenceError(_))));
    }
}

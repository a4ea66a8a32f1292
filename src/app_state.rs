//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::ContactService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Contact service for validation and persistence.
    pub contact_service: Arc<ContactService>,
}

impl AppState {
    /// Wraps a service into shareable state.
    #[must_use]
    pub fn new(contact_service: ContactService) -> Self {
        Self {
            contact_service: Arc::new(contact_service),
        }
    }
}

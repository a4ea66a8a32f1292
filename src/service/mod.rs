//! Service layer: business logic orchestration.
//!
//! [`ContactService`] validates submissions and delegates persistence to
//! the [`super::persistence::MessageStore`] it was built with.

pub mod contact_service;

pub use contact_service::ContactService;

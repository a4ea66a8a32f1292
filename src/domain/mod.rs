//! Domain layer: message identity and submission validation.
//!
//! A submission becomes a [`NewMessage`] once its required fields check
//! out; the storage layer later assigns it a [`MessageId`].

pub mod message_id;
pub mod new_message;

pub use message_id::MessageId;
pub use new_message::NewMessage;

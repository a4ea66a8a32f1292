//! # contact-gateway
//!
//! Contact form backend: accepts a JSON submission on `POST /api/contact`,
//! validates the required fields, stores it as one row, and answers with a
//! JSON acknowledgment.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── ContactService (service/)
//!     ├── NewMessage validation (domain/)
//!     │
//!     └── MessageStore (persistence/)
//!           ├── PostgreSQL  (DATABASE_URL)
//!           └── SQLite      (local fallback)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;

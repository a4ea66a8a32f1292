//! Persistence layer: the `messages` table on PostgreSQL or SQLite.
//!
//! [`MessageStore`] is the single storage handle of the service. It is
//! built once at startup from [`ContactConfig::connection_target`] and
//! passed down explicitly; each insert runs in its own transaction.

pub mod models;
pub mod postgres;
pub mod sqlite;

pub use models::StoredMessage;
pub use postgres::PostgresStore;
pub use sqlite::SqliteStore;

use crate::config::ContactConfig;
use crate::domain::NewMessage;
use crate::error::ContactError;

/// Storage backend selected from a connection string scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// `postgres://` or `postgresql://`.
    Postgres,
    /// `sqlite:` (file or in-memory).
    Sqlite,
}

impl Backend {
    /// Resolves the backend for a connection target.
    ///
    /// # Errors
    ///
    /// Returns a [`ContactError::PersistenceError`] for unknown schemes.
    pub fn from_target(target: &str) -> Result<Self, ContactError> {
        if target.starts_with("postgres://") || target.starts_with("postgresql://") {
            Ok(Self::Postgres)
        } else if target.starts_with("sqlite:") {
            Ok(Self::Sqlite)
        } else {
            let scheme = target.split(':').next().unwrap_or_default();
            Err(ContactError::PersistenceError(format!(
                "unsupported connection target scheme: {scheme:?}"
            )))
        }
    }
}

/// Message store dispatching to the configured backend.
#[derive(Debug, Clone)]
pub enum MessageStore {
    /// PostgreSQL store.
    Postgres(PostgresStore),
    /// SQLite store.
    Sqlite(SqliteStore),
}

impl MessageStore {
    /// Connects to the backend named by `config.connection_target`.
    ///
    /// # Errors
    ///
    /// Returns a [`ContactError::PersistenceError`] if the scheme is not
    /// supported or the database cannot be opened.
    pub async fn connect(config: &ContactConfig) -> Result<Self, ContactError> {
        let backend = Backend::from_target(&config.connection_target)?;
        let store = match backend {
            Backend::Postgres => Self::Postgres(PostgresStore::connect(config).await?),
            Backend::Sqlite => Self::Sqlite(SqliteStore::connect(config).await?),
        };
        tracing::info!(backend = ?backend, "message store connected");
        Ok(store)
    }

    /// Returns which backend this store talks to.
    #[must_use]
    pub const fn backend(&self) -> Backend {
        match self {
            Self::Postgres(_) => Backend::Postgres,
            Self::Sqlite(_) => Backend::Sqlite,
        }
    }

    /// Creates the `messages` table if it is absent. Never drops or alters
    /// existing data, so it is safe to call on every start.
    ///
    /// # Errors
    ///
    /// Returns a [`ContactError::PersistenceError`] on database failure.
    pub async fn ensure_schema(&self) -> Result<(), ContactError> {
        match self {
            Self::Postgres(store) => store.ensure_schema().await,
            Self::Sqlite(store) => store.ensure_schema().await,
        }
    }

    /// Stages and commits one message as a single unit of work.
    ///
    /// # Errors
    ///
    /// Returns a [`ContactError::PersistenceError`] after rolling back if
    /// the row could not be written.
    pub async fn insert(&self, record: &NewMessage) -> Result<StoredMessage, ContactError> {
        match self {
            Self::Postgres(store) => store.insert(record).await,
            Self::Sqlite(store) => store.insert(record).await,
        }
    }

    /// Returns the number of stored messages.
    ///
    /// # Errors
    ///
    /// Returns a [`ContactError::PersistenceError`] on database failure.
    pub async fn count(&self) -> Result<i64, ContactError> {
        match self {
            Self::Postgres(store) => store.count().await,
            Self::Sqlite(store) => store.count().await,
        }
    }

    /// Checks the database is reachable.
    ///
    /// # Errors
    ///
    /// Returns a [`ContactError::PersistenceError`] on database failure.
    pub async fn ping(&self) -> Result<(), ContactError> {
        match self {
            Self::Postgres(store) => store.ping().await,
            Self::Sqlite(store) => store.ping().await,
        }
    }
}

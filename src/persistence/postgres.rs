//! PostgreSQL implementation of the message store.

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::models::{MessageRow, StoredMessage};
use crate::config::ContactConfig;
use crate::domain::NewMessage;
use crate::error::ContactError;

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS messages (\
     id BIGSERIAL PRIMARY KEY, \
     name VARCHAR(100) NOT NULL, \
     email VARCHAR(120) NOT NULL, \
     subject VARCHAR(200), \
     message TEXT NOT NULL, \
     timestamp TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP)";

const INSERT_SQL: &str = "INSERT INTO messages (name, email, subject, message) \
     VALUES ($1, $2, $3, $4) \
     RETURNING id, name, email, subject, message, timestamp";

/// PostgreSQL-backed message store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool for `config.connection_target`.
    ///
    /// # Errors
    ///
    /// Returns a [`ContactError::PersistenceError`] if the server cannot
    /// be reached or the connection string is invalid.
    pub async fn connect(config: &ContactConfig) -> Result<Self, ContactError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.connection_target)
            .await?;
        Ok(Self::new(pool))
    }

    /// Creates the `messages` table if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns a [`ContactError::PersistenceError`] on database failure.
    pub async fn ensure_schema(&self) -> Result<(), ContactError> {
        sqlx::query(CREATE_TABLE_SQL).execute(&self.pool).await?;
        Ok(())
    }

    /// Inserts one message inside its own transaction.
    ///
    /// # Errors
    ///
    /// Returns a [`ContactError::PersistenceError`] if staging or commit
    /// fails; the transaction is rolled back and the table is unchanged.
    pub async fn insert(&self, record: &NewMessage) -> Result<StoredMessage, ContactError> {
        let mut tx = self.pool.begin().await?;

        let staged = sqlx::query_as::<_, MessageRow>(INSERT_SQL)
            .bind(record.name())
            .bind(record.email())
            .bind(record.subject())
            .bind(record.message())
            .fetch_one(&mut *tx)
            .await;

        let row = match staged {
            Ok(row) => row,
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!(error = %rollback_err, "rollback after failed insert did not complete");
                }
                return Err(err.into());
            }
        };

        tx.commit().await?;
        Ok(row.into())
    }

    /// Returns the number of stored messages.
    ///
    /// # Errors
    ///
    /// Returns a [`ContactError::PersistenceError`] on database failure.
    pub async fn count(&self) -> Result<i64, ContactError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM messages")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    /// Round-trips a trivial query to check the server is reachable.
    ///
    /// # Errors
    ///
    /// Returns a [`ContactError::PersistenceError`] on database failure.
    pub async fn ping(&self) -> Result<(), ContactError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

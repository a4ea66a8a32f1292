//! SQLite implementation of the message store.
//!
//! Used as the fallback store when no external database is configured,
//! and by the test suite with `sqlite::memory:`.

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use super::models::{MessageRow, StoredMessage};
use crate::config::ContactConfig;
use crate::domain::NewMessage;
use crate::error::ContactError;

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS messages (\
     id INTEGER PRIMARY KEY AUTOINCREMENT, \
     name VARCHAR(100) NOT NULL, \
     email VARCHAR(120) NOT NULL, \
     subject VARCHAR(200), \
     message TEXT NOT NULL, \
     timestamp DATETIME NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')))";

const INSERT_SQL: &str = "INSERT INTO messages (name, email, subject, message) \
     VALUES (?, ?, ?, ?) \
     RETURNING id, name, email, subject, message, timestamp";

/// SQLite-backed message store using `sqlx::SqlitePool`.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens `config.connection_target`, creating the database file if it
    /// is missing.
    ///
    /// In-memory targets get exactly one connection that is never recycled,
    /// since every SQLite connection would otherwise see its own empty
    /// database.
    ///
    /// # Errors
    ///
    /// Returns a [`ContactError::PersistenceError`] if the target cannot be
    /// parsed or opened.
    pub async fn connect(config: &ContactConfig) -> Result<Self, ContactError> {
        let target = config.connection_target.as_str();
        let options = SqliteConnectOptions::from_str(target)?.create_if_missing(true);

        let pool_options = SqlitePoolOptions::new()
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs));
        let pool_options = if is_in_memory(target) {
            pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            pool_options
                .max_connections(config.database_max_connections)
                .min_connections(config.database_min_connections)
        };

        let pool = pool_options.connect_with(options).await?;
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

    /// Runs a trivial query to check the database is usable.
    ///
    /// # Errors
    ///
    /// Returns a [`ContactError::PersistenceError`] on database failure.
    pub async fn ping(&self) -> Result<(), ContactError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Returns the underlying pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn is_in_memory(target: &str) -> bool {
    target.contains(":memory:") || target.contains("mode=memory")
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::{SubsecRound, Utc};

    use super::*;

    fn memory_config() -> ContactConfig {
        ContactConfig {
            connection_target: "sqlite::memory:".to_string(),
            ..ContactConfig::default()
        }
    }

    async fn memory_store() -> SqliteStore {
        let Ok(store) = SqliteStore::connect(&memory_config()).await else {
            panic!("in-memory sqlite should open");
        };
        let Ok(()) = store.ensure_schema().await else {
            panic!("schema creation failed");
        };
        store
    }

    fn sample(name: &str) -> NewMessage {
        let Ok(msg) = NewMessage::new(
            Some(name.to_string()),
            Some("a@example.com".to_string()),
            Some("Hi".to_string()),
            Some("Hello there".to_string()),
        ) else {
            panic!("sample message should validate");
        };
        msg
    }

    #[tokio::test]
    async fn insert_returns_stored_row_with_generated_fields() {
        let store = memory_store().await;
        let before = Utc::now().trunc_subsecs(3);

        let Ok(stored) = store.insert(&sample("Alice")).await else {
            panic!("insert failed");
        };

        assert_eq!(stored.name, "Alice");
        assert_eq!(stored.email, "a@example.com");
        assert_eq!(stored.subject.as_deref(), Some("Hi"));
        assert_eq!(stored.message, "Hello there");
        assert!(stored.timestamp >= before);
        assert!(stored.timestamp <= Utc::now());
        assert!(matches!(store.count().await, Ok(1)));
    }

    #[tokio::test]
    async fn ids_increase_monotonically() {
        let store = memory_store().await;
        let (Ok(first), Ok(second)) = (
            store.insert(&sample("one")).await,
            store.insert(&sample("two")).await,
        ) else {
            panic!("inserts failed");
        };
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn absent_subject_is_stored_as_null() {
        let store = memory_store().await;
        let Ok(msg) = NewMessage::new(
            Some("Bob".to_string()),
            Some("b@example.com".to_string()),
            Some(String::new()),
            Some("hey".to_string()),
        ) else {
            panic!("message should validate");
        };
        let Ok(stored) = store.insert(&msg).await else {
            panic!("insert failed");
        };
        assert_eq!(stored.subject, None);

        let null_subjects =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM messages WHERE subject IS NULL")
                .fetch_one(store.pool())
                .await;
        assert!(matches!(null_subjects, Ok(1)));
    }

    #[tokio::test]
    async fn failed_insert_rolls_back_and_leaves_table_unchanged() {
        let store = memory_store().await;
        let Ok(_) = store.insert(&sample("kept")).await else {
            panic!("first insert failed");
        };

        let Ok(_) = sqlx::query(
            "CREATE TRIGGER reject_inserts BEFORE INSERT ON messages \
             BEGIN SELECT RAISE(ABORT, 'storage offline'); END",
        )
        .execute(store.pool())
        .await
        else {
            panic!("trigger creation failed");
        };

        let result = store.insert(&sample("lost")).await;
        let Err(ContactError::PersistenceError(cause)) = result else {
            panic!("insert should fail with a persistence error");
        };
        assert!(cause.contains("storage offline"));
        assert!(matches!(store.count().await, Ok(1)));
    }

    #[tokio::test]
    async fn ensure_schema_is_idempotent_and_keeps_rows() {
        let store = memory_store().await;
        let Ok(_) = store.insert(&sample("Alice")).await else {
            panic!("insert failed");
        };

        for _ in 0..3 {
            assert!(store.ensure_schema().await.is_ok());
        }

        let tables = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'messages'",
        )
        .fetch_one(store.pool())
        .await;
        assert!(matches!(tables, Ok(1)));
        assert!(matches!(store.count().await, Ok(1)));
    }

    #[tokio::test]
    async fn file_store_survives_reopen() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir failed");
        };
        let path = dir.path().join("messages.db");
        let config = ContactConfig {
            connection_target: format!("sqlite://{}", path.display()),
            ..ContactConfig::default()
        };

        {
            let Ok(store) = SqliteStore::connect(&config).await else {
                panic!("file store should open");
            };
            assert!(store.ensure_schema().await.is_ok());
            assert!(store.insert(&sample("Alice")).await.is_ok());
            store.pool().close().await;
        }

        let Ok(reopened) = SqliteStore::connect(&config).await else {
            panic!("file store should reopen");
        };
        assert!(reopened.ensure_schema().await.is_ok());
        assert!(matches!(reopened.count().await, Ok(1)));
        assert!(path.exists());
    }

    #[tokio::test]
    async fn ping_succeeds_on_open_pool_and_fails_after_close() {
        let store = memory_store().await;
        assert!(store.ping().await.is_ok());
        store.pool().close().await;
        assert!(store.ping().await.is_err());
    }

    #[test]
    fn recognizes_in_memory_targets() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://file:contact?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://local_messages.db"));
    }
}

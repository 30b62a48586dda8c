//! Local SQLite key-value store.
//!
//! `LocalStore` wraps a SQLite connection pool holding a single
//! `kv_store` table of key/value text pairs.

use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::debug;

use super::KeyValueStore;
use crate::error::Result;

#[derive(Clone)]
pub struct LocalStore {
    pool: SqlitePool,
}

impl LocalStore {
    /// Create an in-memory store for testing.
    pub async fn new_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str(":memory:")?.create_if_missing(true);

        // One connection: every pooled connection would get its own empty database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Create a file-based store at the specified path.
    pub async fn new(path: &Path) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        debug!(path = %path.display(), "opened key-value store");
        Ok(Self { pool })
    }

    /// Create the key/value table.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// All stored keys, sorted.
    pub async fn keys(&self) -> Result<Vec<String>> {
        let keys = sqlx::query_scalar::<_, String>("SELECT key FROM kv_store ORDER BY key")
            .fetch_all(&self.pool)
            .await?;
        Ok(keys)
    }
}

impl KeyValueStore for LocalStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value) VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        debug!(key, bytes = value.len(), "stored value");
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_store() -> LocalStore {
        let store = LocalStore::new_in_memory().await.unwrap();
        store.run_migrations().await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let store = setup_store().await;
        assert_eq!(store.get_item("NOTES_DATA").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let store = setup_store().await;
        store.set_item("NOTES_DATA", "[]").await.unwrap();

        assert_eq!(
            store.get_item("NOTES_DATA").await.unwrap().as_deref(),
            Some("[]")
        );
    }

    #[tokio::test]
    async fn test_set_overwrites_whole_value() {
        let store = setup_store().await;
        store.set_item("TODO_DATA", r#"[{"a":1}]"#).await.unwrap();
        store.set_item("TODO_DATA", "[]").await.unwrap();

        assert_eq!(store.get_item("TODO_DATA").await.unwrap().as_deref(), Some("[]"));
        assert_eq!(store.keys().await.unwrap(), vec!["TODO_DATA".to_string()]);
    }

    #[tokio::test]
    async fn test_remove_item() {
        let store = setup_store().await;
        store.set_item("NOTES_DATA", "[]").await.unwrap();
        store.remove_item("NOTES_DATA").await.unwrap();

        assert_eq!(store.get_item("NOTES_DATA").await.unwrap(), None);
        // Removing a missing key is not an error
        store.remove_item("NOTES_DATA").await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_table_is_storage_error() {
        let store = LocalStore::new_in_memory().await.unwrap();
        let err = store.get_item("NOTES_DATA").await.unwrap_err();
        assert!(matches!(err, crate::DeskmateError::Storage(_)));
    }
}

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use itr_core::{KeyValueStore, StoreError};
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};

/// [`KeyValueStore`] over the `kv_store` table.
///
/// `value` is a `TEXT NOT NULL` column, so SQLite's type affinity turns a
/// number written by hand into text and every row reads back as a string.
/// `updated_at` is bookkeeping for people inspecting the file.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn connect_with(options: SqliteConnectOptions) -> Result<Self> {
        let filename = options.get_filename().display().to_string();
        let pool = SqlitePool::connect_with(options)
            .await
            .with_context(|| format!("Failed to open database: {}", filename))?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>, StoreError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(|row| {
            row.try_get::<String, _>("value")
                .map_err(|e| StoreError::Database(format!("Failed to read value of '{}': {}", key, e)))
        })
        .transpose()
    }

    async fn set(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::debug!(key, value, "stored");
        Ok(())
    }

    async fn remove(
        &self,
        key: &str,
    ) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, StoreError> {
        let rows = sqlx::query("SELECT key FROM kv_store ORDER BY key")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        rows.iter()
            .map(|row| {
                row.try_get::<String, _>("key")
                    .map_err(|e| StoreError::Database(e.to_string()))
            })
            .collect()
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM kv_store")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::info!(removed = result.rows_affected(), "store cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use itr_core::db::keys;
    use pretty_assertions::assert_eq;
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;

    async fn setup_test_db() -> SqliteStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");

        let store = SqliteStore::new_with_pool(pool).await;
        store
            .run_migrations()
            .await
            .expect("Failed to run migrations");
        store
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let store = setup_test_db().await;

        assert_eq!(store.get(keys::SALARY_TOTAL).await, Ok(None));
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let store = setup_test_db().await;

        store.set(keys::SALARY_TOTAL, "1200000").await.unwrap();

        assert_eq!(
            store.get(keys::SALARY_TOTAL).await,
            Ok(Some("1200000".to_string()))
        );
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let store = setup_test_db().await;

        store.set(keys::CAPITAL_GAINS_TOTAL, "150000").await.unwrap();
        store.set(keys::CAPITAL_GAINS_TOTAL, "50000").await.unwrap();

        assert_eq!(
            store.get(keys::CAPITAL_GAINS_TOTAL).await,
            Ok(Some("50000".to_string()))
        );
        assert_eq!(store.keys().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let store = setup_test_db().await;
        store.set(keys::OTHER_SOURCES_TOTAL, "10000").await.unwrap();

        store.remove(keys::OTHER_SOURCES_TOTAL).await.unwrap();
        store.remove(keys::OTHER_SOURCES_TOTAL).await.unwrap();

        assert_eq!(store.get(keys::OTHER_SOURCES_TOTAL).await, Ok(None));
    }

    #[tokio::test]
    async fn test_keys_are_sorted() {
        let store = setup_test_db().await;
        store.set(keys::SALARY_TOTAL, "1").await.unwrap();
        store.set(keys::CAPITAL_GAINS_TOTAL, "2").await.unwrap();
        store.set(keys::DEDUCTIONS_DATA, "{}").await.unwrap();

        assert_eq!(
            store.keys().await.unwrap(),
            vec!["cg_total", "deductions_data", "salary_total"]
        );
    }

    #[tokio::test]
    async fn test_clear() {
        let store = setup_test_db().await;
        store.set(keys::SALARY_TOTAL, "1").await.unwrap();
        store.set(keys::HOUSE_PROPERTY_TOTAL, "2").await.unwrap();

        store.clear().await.unwrap();

        assert!(store.keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_hand_written_numbers_are_stored_as_text() {
        let store = setup_test_db().await;
        sqlx::query(
            "INSERT INTO kv_store (key, value, updated_at) VALUES
                ('hp_total', 100000, '2026-01-01T00:00:00Z'),
                ('os_total', 2500.75, '2026-01-01T00:00:00Z')",
        )
        .execute(&store.pool)
        .await
        .expect("Failed to insert test data");

        assert_eq!(
            store.get(keys::HOUSE_PROPERTY_TOTAL).await,
            Ok(Some("100000".to_string()))
        );
        assert_eq!(
            store.get(keys::OTHER_SOURCES_TOTAL).await,
            Ok(Some("2500.75".to_string()))
        );
    }

    #[tokio::test]
    async fn test_null_value_is_refused() {
        let store = setup_test_db().await;

        let result = sqlx::query("INSERT INTO kv_store (key, value, updated_at) VALUES ('cg_total', NULL, 'x')")
            .execute(&store.pool)
            .await;

        assert!(result.is_err());
    }
}

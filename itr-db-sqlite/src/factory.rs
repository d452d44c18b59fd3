use std::str::FromStr;

use async_trait::async_trait;
use itr_core::db::{StoreConfig, StoreFactory};
use itr_core::{KeyValueStore, StoreError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::repository::SqliteStore;

/// Turn a connection string into connect options.
///
/// * `":memory:"` or `"sqlite::memory:"` is an ephemeral database.
/// * A `sqlite:` URL is passed to sqlx as-is.
/// * Anything else is a file path; the file is created if missing.
pub fn connect_options(connection_string: &str) -> Result<SqliteConnectOptions, StoreError> {
    let trimmed = connection_string.trim();
    if trimmed.is_empty() {
        return Err(StoreError::Configuration(
            "sqlite connection string is empty".to_string(),
        ));
    }

    if trimmed == ":memory:" {
        return SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| StoreError::Configuration(e.to_string()));
    }

    if trimmed.starts_with("sqlite:") {
        return SqliteConnectOptions::from_str(trimmed)
            .map_err(|e| StoreError::Configuration(e.to_string()));
    }

    Ok(SqliteConnectOptions::new()
        .filename(trimmed)
        .create_if_missing(true))
}

fn is_in_memory(connection_string: &str) -> bool {
    connection_string.contains(":memory:") || connection_string.contains("mode=memory")
}

/// [`StoreFactory`] for SQLite.
///
/// Register this with a [`itr_core::db::StoreRegistry`] to make the
/// `"sqlite"` backend available:
///
/// ```rust,no_run
/// use itr_core::db::StoreRegistry;
/// use itr_db_sqlite::SqliteStoreFactory;
///
/// let mut registry = StoreRegistry::new();
/// registry.register(Box::new(SqliteStoreFactory));
/// ```
pub struct SqliteStoreFactory;

#[async_trait]
impl StoreFactory for SqliteStoreFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Open the database described by `config.connection_string` and bring
    /// its schema up to date.
    async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn KeyValueStore>, StoreError> {
        let options = connect_options(&config.connection_string)?;

        // every connection to an in-memory database would get its own copy
        let store = if is_in_memory(&config.connection_string) {
            let pool = SqlitePoolOptions::new()
                .max_connections(1)
                .connect_with(options)
                .await
                .map_err(|e| StoreError::Connection(e.to_string()))?;
            SqliteStore::new_with_pool(pool).await
        } else {
            SqliteStore::connect_with(options)
                .await
                .map_err(|e| StoreError::Connection(format!("{:#}", e)))?
        };

        store
            .run_migrations()
            .await
            .map_err(|e| StoreError::Database(format!("{:#}", e)))?;

        tracing::info!(connection = %config.connection_string, "sqlite store ready");
        Ok(Box::new(store))
    }
}

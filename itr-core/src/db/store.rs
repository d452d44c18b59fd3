use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// String key-value storage shared by every form and summary view.
///
/// Writes replace the previous value outright. There is no versioning and
/// no locking: with several writers the last write wins.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// `Ok(None)` when the key has never been written (or was removed).
    async fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>, StoreError>;

    async fn set(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), StoreError>;

    /// Removing an absent key is not an error.
    async fn remove(
        &self,
        key: &str,
    ) -> Result<(), StoreError>;

    /// Keys currently present, sorted.
    async fn keys(&self) -> Result<Vec<String>, StoreError>;

    async fn clear(&self) -> Result<(), StoreError>;
}

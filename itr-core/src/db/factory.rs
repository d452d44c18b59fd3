use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::store::{KeyValueStore, StoreError};

/// Which backend to open and where.
///
/// `connection_string` means whatever the named backend decides: a file
/// path or `:memory:` for `sqlite`, nothing at all for `memory`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: String,
    pub connection_string: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection_string: "itr.db".to_string(),
        }
    }
}

/// Opens one kind of [`KeyValueStore`]. Backend crates export a unit struct
/// implementing this and binaries register it with a [`StoreRegistry`].
#[async_trait]
pub trait StoreFactory: Send + Sync {
    /// Name matched against [`StoreConfig::backend`].
    fn backend_name(&self) -> &'static str;

    /// Opens the store, creating and migrating it if needed.
    async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn KeyValueStore>, StoreError>;
}

/// Backend name to factory lookup used at startup.
#[derive(Default)]
pub struct StoreRegistry {
    factories: BTreeMap<&'static str, Box<dyn StoreFactory>>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last registration for a name wins.
    pub fn register(
        &mut self,
        factory: Box<dyn StoreFactory>,
    ) {
        let name = factory.backend_name();
        if self.factories.insert(name, factory).is_some() {
            tracing::debug!(backend = name, "store factory replaced");
        }
    }

    /// Registered backend names in alphabetical order.
    pub fn available_backends(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }

    /// Opens the store named by `config.backend`.
    ///
    /// An unregistered name gives [`StoreError::Configuration`] listing the
    /// names that are registered. Factory errors pass through unchanged.
    pub async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn KeyValueStore>, StoreError> {
        let Some(factory) = self.factories.get(config.backend.as_str()) else {
            return Err(StoreError::Configuration(format!(
                "unknown backend '{}'; available: {:?}",
                config.backend,
                self.available_backends()
            )));
        };

        tracing::debug!(
            backend = %config.backend,
            connection = %config.connection_string,
            "opening store"
        );
        factory.create(config).await
    }
}

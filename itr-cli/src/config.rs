//! `itr.toml` configuration.
//!
//! Every section and key is optional:
//!
//! ```toml
//! [store]
//! backend = "sqlite"
//! connection_string = "itr.db"
//!
//! [logging]
//! level = "info"
//! file = "itr.log"
//!
//! [view]
//! default_regime = "new"
//! ```

use std::path::{Path, PathBuf};

use itr_core::TaxRegime;
use itr_core::db::StoreConfig;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "itr.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Bare level or any `EnvFilter` directive. `RUST_LOG` takes precedence.
    pub level: String,
    /// Append log records to this file as well.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Regime shown by the total-income view when none is requested.
    pub default_regime: TaxRegime,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub logging: LoggingConfig,
    pub view: ViewConfig,
}

impl AppConfig {
    pub fn from_toml_str(
        text: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads `path`, or `itr.toml` in the working directory when `path` is
    /// `None`. A missing default file yields the defaults; a missing file
    /// that was asked for by name is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        match std::fs::read_to_string(&path) {
            Ok(text) => Self::from_toml_str(&text, &path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !explicit => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read { path, source }),
        }
    }

    /// Command-line flags win over the file.
    pub fn with_overrides(
        mut self,
        backend: Option<String>,
        db: Option<String>,
    ) -> Self {
        if let Some(backend) = backend {
            self.store.backend = backend;
        }
        if let Some(db) = db {
            self.store.connection_string = db;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(text: &str) -> Result<AppConfig, ConfigError> {
        AppConfig::from_toml_str(text, Path::new("test.toml"))
    }

    #[test]
    fn empty_file_gives_defaults() {
        let config = parse("").unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.store.backend, "sqlite");
        assert_eq!(config.store.connection_string, "itr.db");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.view.default_regime, TaxRegime::New);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = parse(
            r#"
            [store]
            connection_string = "/tmp/returns.db"

            [view]
            default_regime = "old"
            "#,
        )
        .unwrap();

        assert_eq!(config.store.backend, "sqlite");
        assert_eq!(config.store.connection_string, "/tmp/returns.db");
        assert_eq!(config.view.default_regime, TaxRegime::Old);
        assert_eq!(config.logging.file, None);
    }

    #[test]
    fn unknown_regime_is_a_parse_error() {
        let result = parse("[view]\ndefault_regime = \"flat\"\n");

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn overrides_replace_file_values() {
        let config = AppConfig::default().with_overrides(Some("memory".to_string()), None);

        assert_eq!(config.store.backend, "memory");
        assert_eq!(config.store.connection_string, "itr.db");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = AppConfig::load(Some(Path::new("/nonexistent/itr.toml")));

        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}

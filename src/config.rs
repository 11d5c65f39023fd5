//! Application configuration.
//!
//! Everything the system needs at startup lives in one [`BakeryConfig`] that is
//! passed to [`BakerySystem::open`](crate::lifecycle::BakerySystem::open).

use crate::policy::OrderPolicy;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "bakery.yaml";
/// Environment variable for configuration file path.
pub const CONFIG_ENV_VAR: &str = "BAKERY_CONFIG";
/// Prefix for configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "BAKERY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BakeryConfig {
    pub storage: StorageConfig,
    pub actors: ActorConfig,
    /// Per-order cap, duplicate-customer rule and deadline.
    pub ordering: OrderPolicy,
    pub operator: OperatorConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding one JSON file per collection.
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ActorConfig {
    /// Channel capacity of every collection actor.
    pub buffer_size: usize,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self { buffer_size: 32 }
    }
}

#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct OperatorConfig {
    /// Shared operator password. Empty disables operator login.
    pub password: String,
}

impl std::fmt::Debug for OperatorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperatorConfig")
            .field("password", &if self.password.is_empty() { "" } else { "***" })
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl BakeryConfig {
    /// Load configuration from file and environment.
    ///
    /// Configuration sources (in order of priority, later overrides earlier):
    /// 1. `bakery.yaml` in current directory (if exists)
    /// 2. File specified by `path` argument (if provided)
    /// 3. File specified by `BAKERY_CONFIG` environment variable (if set)
    /// 4. Environment variables prefixed `BAKERY__`, e.g. `BAKERY__STORAGE__DATA_DIR`
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        use ::config::{Config as ConfigLib, Environment, File, FileFormat};

        let mut builder = ConfigLib::builder()
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false));

        if let Some(config_path) = path {
            builder = builder.add_source(File::new(config_path, FileFormat::Yaml).required(true));
        }

        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            builder = builder.add_source(File::new(&config_path, FileFormat::Yaml).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: BakeryConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Configuration for tests: defaults with the given operator password.
    pub fn for_test(password: &str) -> Self {
        Self {
            operator: OperatorConfig {
                password: password.to_string(),
            },
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.actors.buffer_size == 0 {
            return Err(ConfigError::Invalid("actors.buffer_size must be positive".into()));
        }
        if self.ordering.max_loaves_per_order == 0 {
            return Err(ConfigError::Invalid(
                "ordering.max_loaves_per_order must be positive".into(),
            ));
        }
        Ok(())
    }
}

//! # Configuration
//!
//! Settings are layered with `figment`, later layers winning:
//!
//! 1. Built-in defaults ([`CatalogConfig::default`])
//! 2. `catalog.toml` in the working directory, if present
//! 3. `CATALOG_*` environment variables (`CATALOG_STORE_TIMEOUT_MS=500`)

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILE: &str = "catalog.toml";
pub const ENV_PREFIX: &str = "CATALOG_";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),
    #[error("Invalid configuration value for {field}: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        Self::Load(Box::new(error))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Upper bound for a single store round trip, in milliseconds.
    pub store_timeout_ms: u64,
    /// Request queue capacity of each store actor.
    pub channel_buffer: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            store_timeout_ms: 2000,
            channel_buffer: 32,
        }
    }
}

impl CatalogConfig {
    /// Loads from `catalog.toml` and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(CONFIG_FILE)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(path.as_ref()).extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.store_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "store_timeout_ms",
                reason: "must be greater than zero",
            });
        }
        if self.channel_buffer == 0 {
            return Err(ConfigError::Invalid {
                field: "channel_buffer",
                reason: "must be greater than zero",
            });
        }
        Ok(())
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}

//! Configuration module for the etherscan CLI.
//!
//! Handles loading configuration from an optional TOML file and applying
//! command-line and environment overrides on top of it.

pub mod file;

use crate::config::file::FileConfig;
use etherscan_core::cache::{CacheBackend, CacheSettings, MAX_EXPIRE_AFTER, default_cache_path};
use etherscan_sdk::Network;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("cache expiry of {0} seconds is too long (max {max})", max = MAX_EXPIRE_AFTER.as_secs())]
    ExpireAfterTooLong(u64),
}

/// Values given on the command line (or through the environment).
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub network: Option<Network>,
    pub cache_backend: Option<CacheBackend>,
    pub expire_after_secs: Option<u64>,
}

/// Effective configuration after merging the file and the overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    pub api_key: Option<String>,
    pub network: Network,
    pub cache: CacheSettings,
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: PathBuf,
    /// A missing file is an error only when the path was given explicitly.
    required: bool,
    overrides: Overrides,
}

impl ConfigLoader {
    pub fn new(config_path: impl AsRef<Path>, required: bool, overrides: Overrides) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            required,
            overrides,
        }
    }

    /// Load and process the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file, if present
    /// 2. Apply command-line overrides
    /// 3. Build and validate the loaded configuration
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let file_config = self.read_file()?;
        self.build_loaded_config(file_config)
    }

    fn read_file(&self) -> Result<FileConfig, ConfigError> {
        match std::fs::read_to_string(&self.config_path) {
            Ok(content) => {
                tracing::debug!("Configuration loaded from {:?}", self.config_path);
                Ok(toml::from_str(&content)?)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if self.required {
                    return Err(ConfigError::NotFound(self.config_path.clone()));
                }
                tracing::debug!("No config file at {:?}, using defaults", self.config_path);
                Ok(FileConfig::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn build_loaded_config(&self, file_config: FileConfig) -> Result<LoadedConfig, ConfigError> {
        let overrides = self.overrides.clone();
        let non_empty = |key: &String| !key.trim().is_empty();
        let api_key = overrides
            .api_key
            .filter(non_empty)
            .or(file_config.client.api_key.filter(non_empty));

        let expire_after_secs = overrides
            .expire_after_secs
            .unwrap_or(file_config.cache.expire_after_secs);
        let expire_after = Duration::from_secs(expire_after_secs);
        if expire_after > MAX_EXPIRE_AFTER {
            return Err(ConfigError::ExpireAfterTooLong(expire_after_secs));
        }

        Ok(LoadedConfig {
            api_key,
            network: overrides.network.unwrap_or(file_config.client.network),
            cache: CacheSettings {
                backend: overrides.cache_backend.unwrap_or(file_config.cache.backend),
                expire_after,
                path: file_config.cache.path.unwrap_or_else(default_cache_path),
            },
        })
    }
}

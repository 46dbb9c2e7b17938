//! TOML file configuration structures.
//!
//! These structs directly map to the `etherscan.toml` file format. Every
//! section and key is optional.

use etherscan_core::cache::{CacheBackend, DEFAULT_EXPIRE_AFTER};
use etherscan_sdk::Network;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// API access section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Etherscan API key. `ETHERSCAN_KEY` and `--api-key` take precedence.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub network: Network,
}

/// Response cache section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    #[serde(default)]
    pub backend: CacheBackend,
    /// Seconds a cached response stays fresh.
    #[serde(default = "default_expire_after_secs")]
    pub expire_after_secs: u64,
    /// SQLite cache file. Defaults to `etherscan_cache.sqlite` in the temp directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            expire_after_secs: default_expire_after_secs(),
            path: None,
        }
    }
}

fn default_expire_after_secs() -> u64 {
    DEFAULT_EXPIRE_AFTER.as_secs()
}

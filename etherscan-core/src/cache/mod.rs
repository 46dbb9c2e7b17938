//! Response cache backends.
//!
//! The SDK client accepts any [`ResponseCache`]. This module provides the
//! two concrete backends and picks one from [`CacheSettings`]:
//!
//! - `sqlite`: survives across processes, stored in a file (default in the
//!   system temp directory)
//! - `memory`: per-process TTL map
//! - `none`: every call goes to the network

mod memory;
mod sqlite;

pub use memory::MemoryCache;
pub use sqlite::SqliteCache;

use etherscan_sdk::client::ResponseCache;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

pub const DEFAULT_EXPIRE_AFTER: Duration = Duration::from_secs(5);
pub const DEFAULT_CACHE_FILE: &str = "etherscan_cache.sqlite";
/// Longest accepted freshness window. Longer values are clamped by the backends.
pub const MAX_EXPIRE_AFTER: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

#[derive(Debug, Error)]
pub enum CacheSetupError {
    #[error("failed to open cache database: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    #[default]
    Sqlite,
    Memory,
    None,
}

impl CacheBackend {
    pub const ALL: [CacheBackend; 3] = [CacheBackend::Sqlite, CacheBackend::Memory, CacheBackend::None];

    pub fn as_str(&self) -> &'static str {
        match self {
            CacheBackend::Sqlite => "sqlite",
            CacheBackend::Memory => "memory",
            CacheBackend::None => "none",
        }
    }
}

impl std::fmt::Display for CacheBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown cache backend {0:?}, expected sqlite, memory or none")]
pub struct UnknownCacheBackend(String);

impl std::str::FromStr for CacheBackend {
    type Err = UnknownCacheBackend;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|backend| backend.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownCacheBackend(s.to_owned()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    pub backend: CacheBackend,
    /// How long a stored response stays fresh.
    pub expire_after: Duration,
    /// SQLite file; only used by the `sqlite` backend.
    pub path: PathBuf,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            expire_after: DEFAULT_EXPIRE_AFTER,
            path: default_cache_path(),
        }
    }
}

pub fn default_cache_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_CACHE_FILE)
}

/// Open the backend described by `settings`, or `None` for [`CacheBackend::None`].
pub async fn open_cache(settings: &CacheSettings) -> Result<Option<Arc<dyn ResponseCache>>, CacheSetupError> {
    let cache: Arc<dyn ResponseCache> = match settings.backend {
        CacheBackend::None => {
            info!("Response cache disabled");
            return Ok(None);
        }
        CacheBackend::Memory => Arc::new(MemoryCache::new(settings.expire_after)),
        CacheBackend::Sqlite => Arc::new(SqliteCache::open(&settings.path, settings.expire_after).await?),
    };

    info!(
        backend = ?settings.backend,
        expire_after_secs = settings.expire_after.as_secs_f64(),
        "Response cache ready"
    );
    Ok(Some(cache))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            backend: CacheBackend,
        }
        let parsed: Wrapper = serde_json::from_str(r#"{"backend": "memory"}"#).unwrap();
        assert_eq!(parsed.backend, CacheBackend::Memory);
        let parsed: Wrapper = serde_json::from_str(r#"{"backend": "none"}"#).unwrap();
        assert_eq!(parsed.backend, CacheBackend::None);
        assert!(serde_json::from_str::<Wrapper>(r#"{"backend": "redis"}"#).is_err());
    }

    #[test]
    fn test_backend_from_str_matches_serde_names() {
        for backend in CacheBackend::ALL {
            assert_eq!(serde_json::to_value(backend).unwrap(), backend.as_str());
            assert_eq!(backend.as_str().parse::<CacheBackend>().unwrap(), backend);
        }
        assert_eq!("SQLite".parse::<CacheBackend>().unwrap(), CacheBackend::Sqlite);
        assert!("redis".parse::<CacheBackend>().is_err());
    }

    #[tokio::test]
    async fn test_huge_expiry_does_not_panic() {
        let memory = CacheSettings {
            backend: CacheBackend::Memory,
            expire_after: Duration::from_secs(40_000_000_000),
            ..Default::default()
        };
        let cache = open_cache(&memory).await.unwrap().unwrap();
        cache.put("k", bytes::Bytes::from_static(b"{}")).await.unwrap();
        assert!(cache.get("k").await.unwrap().is_some());
    }

    #[test]
    fn test_default_settings() {
        let settings = CacheSettings::default();
        assert_eq!(settings.backend, CacheBackend::Sqlite);
        assert_eq!(settings.expire_after, Duration::from_secs(5));
        assert!(settings.path.ends_with("etherscan_cache.sqlite"));
    }

    #[tokio::test]
    async fn test_open_each_backend() {
        let dir = tempfile::tempdir().unwrap();

        let disabled = CacheSettings {
            backend: CacheBackend::None,
            ..Default::default()
        };
        assert!(open_cache(&disabled).await.unwrap().is_none());

        let memory = CacheSettings {
            backend: CacheBackend::Memory,
            ..Default::default()
        };
        assert!(open_cache(&memory).await.unwrap().is_some());

        let sqlite = CacheSettings {
            backend: CacheBackend::Sqlite,
            expire_after: Duration::from_secs(60),
            path: dir.path().join("cache.sqlite"),
        };
        let cache = open_cache(&sqlite).await.unwrap().unwrap();
        cache.put("k", bytes::Bytes::from_static(b"{}")).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some(&b"{}"[..]));
        assert!(dir.path().join("cache.sqlite").exists());
    }
}

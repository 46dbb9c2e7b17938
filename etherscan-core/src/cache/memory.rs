use super::MAX_EXPIRE_AFTER;
use async_trait::async_trait;
use bytes::Bytes;
use etherscan_sdk::client::{CacheError, ResponseCache};
use moka::future::Cache;
use std::time::Duration;

/// Max stored responses before least-recently-used entries are evicted.
const MAX_CACHE_CAPACITY: u64 = 10_000;

/// In-process response cache; entries expire `expire_after` after insertion.
///
/// `expire_after` is capped at [`MAX_EXPIRE_AFTER`].
pub struct MemoryCache {
    cache: Cache<String, Bytes>,
}

impl MemoryCache {
    pub fn new(expire_after: Duration) -> Self {
        Self::with_capacity(expire_after, MAX_CACHE_CAPACITY)
    }

    pub fn with_capacity(expire_after: Duration, capacity: u64) -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(expire_after.min(MAX_EXPIRE_AFTER))
                .build(),
        }
    }
}

#[async_trait]
impl ResponseCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Bytes>, CacheError> {
        Ok(self.cache.get(key).await)
    }

    async fn put(&self, key: &str, body: Bytes) -> Result<(), CacheError> {
        self.cache.insert(key.to_owned(), body).await;
        Ok(())
    }

    async fn clear(&self) -> Result<(), CacheError> {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_clear() {
        let cache = MemoryCache::new(Duration::from_secs(60));
        assert!(cache.get("k").await.unwrap().is_none());

        cache.put("k", Bytes::from_static(b"body")).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), Some(Bytes::from_static(b"body")));

        cache.clear().await.unwrap();
        assert!(cache.get("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let cache = MemoryCache::new(Duration::from_millis(50));
        cache.put("k", Bytes::from_static(b"body")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(cache.get("k").await.unwrap().is_none());
    }
}

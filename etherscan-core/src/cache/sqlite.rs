use crate::entities::cached_response::{
    ClearCachedResponses, CreateResponsesTable, DeleteCachedResponse, DeleteExpiredResponses, GetCachedResponse,
    UpsertCachedResponse,
};
use crate::framework::DatabaseProcessor;
use async_trait::async_trait;
use bytes::Bytes;
use etherscan_sdk::client::{CacheError, ResponseCache};
use kanau::processor::Processor;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Response cache persisted in a SQLite file.
///
/// Expired rows are treated as misses and deleted when read.
pub struct SqliteCache {
    db: DatabaseProcessor,
    expire_after_ms: i64,
}

impl SqliteCache {
    pub async fn open(path: &Path, expire_after: Duration) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::new().filename(path).create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await?;

        let db = DatabaseProcessor::new(pool);
        db.process(CreateResponsesTable).await?;
        debug!(path = %path.display(), "Opened SQLite response cache");

        Ok(Self {
            db,
            expire_after_ms: i64::try_from(expire_after.as_millis()).unwrap_or(i64::MAX),
        })
    }

    /// Remove every expired row. Returns how many were removed.
    pub async fn purge_expired(&self) -> Result<u64, sqlx::Error> {
        let stored_before = now_ms().saturating_sub(self.expire_after_ms);
        self.db.process(DeleteExpiredResponses { stored_before }).await
    }

    pub async fn close(&self) {
        self.db.pool.close().await;
    }

    fn is_fresh(&self, stored_at: i64, now: i64) -> bool {
        now.saturating_sub(stored_at) < self.expire_after_ms
    }
}

fn now_ms() -> i64 {
    let nanos = time::OffsetDateTime::now_utc().unix_timestamp_nanos();
    i64::try_from(nanos / 1_000_000).unwrap_or(i64::MAX)
}

#[async_trait]
impl ResponseCache for SqliteCache {
    async fn get(&self, key: &str) -> Result<Option<Bytes>, CacheError> {
        let Some(row) = self
            .db
            .process(GetCachedResponse { key: key.to_owned() })
            .await
            .map_err(CacheError::new)?
        else {
            return Ok(None);
        };

        if self.is_fresh(row.stored_at, now_ms()) {
            return Ok(Some(Bytes::from(row.body)));
        }

        self.db
            .process(DeleteCachedResponse { key: row.key })
            .await
            .map_err(CacheError::new)?;
        Ok(None)
    }

    async fn put(&self, key: &str, body: Bytes) -> Result<(), CacheError> {
        self.db
            .process(UpsertCachedResponse {
                key: key.to_owned(),
                body: body.to_vec(),
                stored_at: now_ms(),
            })
            .await
            .map_err(CacheError::new)
    }

    async fn clear(&self) -> Result<(), CacheError> {
        let removed = self.db.process(ClearCachedResponses).await.map_err(CacheError::new)?;
        debug!(removed, "Cleared SQLite response cache");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_round_trip_and_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SqliteCache::open(&dir.path().join("cache.sqlite"), Duration::from_secs(60))
            .await
            .unwrap();

        assert!(cache.get("k").await.unwrap().is_none());
        cache.put("k", Bytes::from_static(b"first")).await.unwrap();
        cache.put("k", Bytes::from_static(b"second")).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), Some(Bytes::from_static(b"second")));

        cache.clear().await.unwrap();
        assert!(cache.get("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_rows_are_misses() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SqliteCache::open(&dir.path().join("cache.sqlite"), Duration::ZERO)
            .await
            .unwrap();

        cache.put("k", Bytes::from_static(b"body")).await.unwrap();
        assert!(cache.get("k").await.unwrap().is_none());
        // the stale row was deleted on read
        assert_eq!(cache.purge_expired().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SqliteCache::open(&dir.path().join("cache.sqlite"), Duration::from_millis(20))
            .await
            .unwrap();

        cache.put("a", Bytes::from_static(b"1")).await.unwrap();
        cache.put("b", Bytes::from_static(b"2")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(cache.purge_expired().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.sqlite");

        let cache = SqliteCache::open(&path, Duration::from_secs(60)).await.unwrap();
        cache.put("k", Bytes::from_static(b"body")).await.unwrap();
        cache.close().await;

        let reopened = SqliteCache::open(&path, Duration::from_secs(60)).await.unwrap();
        assert_eq!(reopened.get("k").await.unwrap(), Some(Bytes::from_static(b"body")));
    }
}

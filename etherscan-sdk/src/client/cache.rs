use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

/// Failure inside a cache backend.
#[derive(Debug, thiserror::Error)]
#[error("cache backend error: {message}")]
pub struct CacheError {
    message: String,
}

impl CacheError {
    pub fn new(err: impl std::fmt::Display) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

/// Storage for raw API response bodies, keyed by [`cache_key`].
///
/// Implementations decide how long an entry stays fresh; `get` must not
/// return expired bodies.
#[async_trait]
pub trait ResponseCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Bytes>, CacheError>;

    async fn put(&self, key: &str, body: Bytes) -> Result<(), CacheError>;

    async fn clear(&self) -> Result<(), CacheError>;
}

/// SHA-256 (hex) of the endpoint and the form parameters, sorted by name.
pub fn cache_key(url: &Url, params: &[(&str, String)]) -> String {
    let mut sorted: Vec<&(&str, String)> = params.iter().collect();
    sorted.sort();

    let mut ctx = ring::digest::Context::new(&ring::digest::SHA256);
    ctx.update(url.as_str().as_bytes());
    for (name, value) in sorted {
        ctx.update(b"\n");
        ctx.update(name.as_bytes());
        ctx.update(b"=");
        ctx.update(value.as_bytes());
    }

    hex::encode(ctx.finish())
}

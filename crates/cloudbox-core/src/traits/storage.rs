//! Object store trait for pluggable blob backends.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::AppResult;

/// A byte stream type used for reading object contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Key-addressed blob storage.
///
/// Keys are generated by the caller and treated as opaque. Implementations
/// live in `cloudbox-storage`. Failures are reported as
/// [`ErrorKind::Storage`](crate::ErrorKind::Storage) and are never retried.
#[async_trait]
pub trait ObjectStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "s3", "local").
    fn provider_type(&self) -> &str;

    /// Check whether the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Store `data` under `key`, replacing any existing object.
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()>;

    /// Open the object stored under `key` as a byte stream.
    async fn get(&self, key: &str) -> AppResult<ByteStream>;

    /// Remove the object stored under `key`.
    async fn delete(&self, key: &str) -> AppResult<()>;
}

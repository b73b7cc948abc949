//! S3-compatible object store.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream as S3Body;
use bytes::Bytes;
use tokio_util::io::ReaderStream;
use tracing::{debug, info};

use cloudbox_core::config::storage::S3StorageConfig;
use cloudbox_core::error::{AppError, ErrorKind};
use cloudbox_core::result::AppResult;
use cloudbox_core::traits::storage::{ByteStream, ObjectStore};

/// Object store backed by an S3 bucket.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Build a client from configuration.
    ///
    /// Static credentials are used when an access key is configured;
    /// otherwise the default AWS provider chain (environment, profile,
    /// instance metadata) is consulted.
    pub async fn new(config: &S3StorageConfig) -> AppResult<Self> {
        if config.bucket.is_empty() {
            return Err(AppError::configuration("storage.s3.bucket must be set"));
        }

        let region = Region::new(config.region.clone());
        let mut builder = if config.access_key.is_empty() {
            let shared = aws_config::defaults(BehaviorVersion::latest())
                .region(region)
                .load()
                .await;
            aws_sdk_s3::config::Builder::from(&shared)
        } else {
            let credentials = Credentials::new(
                &config.access_key,
                &config.secret_key,
                None,
                None,
                "cloudbox",
            );
            aws_sdk_s3::config::Builder::new()
                .behavior_version(BehaviorVersion::latest())
                .region(region)
                .credentials_provider(credentials)
        };

        if !config.endpoint.is_empty() {
            builder = builder.endpoint_url(&config.endpoint);
        }
        builder = builder.force_path_style(config.force_path_style);

        info!(
            bucket = %config.bucket,
            region = %config.region,
            endpoint = %config.endpoint,
            "S3 object store configured"
        );

        Ok(Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
        })
    }
}

fn storage_error<E>(action: &str, key: &str, err: E) -> AppError
where
    E: std::error::Error + Send + Sync + 'static,
{
    let message = format!("{action} '{key}' failed: {}", DisplayErrorContext(&err));
    AppError::with_source(ErrorKind::Storage, message, err)
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    fn provider_type(&self) -> &str {
        "s3"
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map(|_| true)
            .map_err(|e| storage_error("Head bucket", &self.bucket, e))
    }

    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()> {
        let size = data.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .content_length(size as i64)
            .body(S3Body::from(data))
            .send()
            .await
            .map_err(|e| storage_error("Put object", key, e))?;

        debug!(key, bytes = size, "Stored object");
        Ok(())
    }

    async fn get(&self, key: &str) -> AppResult<ByteStream> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| storage_error("Get object", key, e))?;

        let reader = output.body.into_async_read();
        Ok(Box::pin(ReaderStream::new(reader)))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| storage_error("Delete object", key, e))?;

        debug!(key, "Deleted object");
        Ok(())
    }
}

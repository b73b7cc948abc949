//! Object store selection from configuration.

use std::sync::Arc;

use tracing::info;

use cloudbox_core::config::storage::{StorageConfig, StorageProviderKind};
use cloudbox_core::result::AppResult;
use cloudbox_core::traits::storage::ObjectStore;

use crate::providers::{LocalObjectStore, MemoryObjectStore, S3ObjectStore};

/// Build the object store named by `storage.provider`.
pub async fn build_object_store(config: &StorageConfig) -> AppResult<Arc<dyn ObjectStore>> {
    let store: Arc<dyn ObjectStore> = match config.provider {
        StorageProviderKind::S3 => Arc::new(S3ObjectStore::new(&config.s3).await?),
        StorageProviderKind::Local => {
            Arc::new(LocalObjectStore::new(&config.local.root_path).await?)
        }
        StorageProviderKind::Memory => Arc::new(MemoryObjectStore::new()),
    };

    info!(provider = store.provider_type(), "Object store ready");
    Ok(store)
}

//! Shared fixtures for service tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use uuid::Uuid;

use cloudbox_core::config::storage::StorageConfig;
use cloudbox_core::error::AppError;
use cloudbox_core::result::AppResult;
use cloudbox_core::traits::storage::{ByteStream, ObjectStore};
use cloudbox_database::{Catalog, MemoryCatalog};
use cloudbox_storage::MemoryObjectStore;

use crate::context::RequestContext;
use crate::file::{DownloadService, FileService, UploadService};
use crate::folder::FolderService;

/// Services wired to in-memory backends.
pub(crate) struct Fixture {
    pub store: Arc<MemoryObjectStore>,
    pub folders: FolderService,
    pub uploads: UploadService,
    pub downloads: DownloadService,
    pub files: FileService,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_config(StorageConfig::default())
    }

    pub fn with_config(config: StorageConfig) -> Self {
        let store = Arc::new(MemoryObjectStore::new());
        let (folders, uploads, downloads, files) = wire(store.clone(), config);
        Self {
            store,
            folders,
            uploads,
            downloads,
            files,
        }
    }

    pub fn user(&self, name: &str) -> RequestContext {
        RequestContext::new(Uuid::new_v4(), name)
    }
}

/// Build every service over one catalog and the given object store.
pub(crate) fn wire(
    store: Arc<dyn ObjectStore>,
    config: StorageConfig,
) -> (FolderService, UploadService, DownloadService, FileService) {
    let memory = Arc::new(MemoryCatalog::new());
    let catalog = Arc::new(Catalog::new(memory.clone(), memory));
    (
        FolderService::new(catalog.clone()),
        UploadService::new(catalog.clone(), store.clone(), config.clone()),
        DownloadService::new(catalog.clone(), store.clone(), config.clone()),
        FileService::new(catalog, store, config),
    )
}

/// Object store whose writes and deletes can be made to fail.
#[derive(Debug, Default)]
pub(crate) struct FlakyStore {
    inner: MemoryObjectStore,
    failing: AtomicBool,
}

impl FlakyStore {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.inner.contains(key).await
    }

    pub async fn len(&self) -> usize {
        self.inner.len().await
    }

    fn check(&self) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(AppError::storage("Object store unavailable"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ObjectStore for FlakyStore {
    fn provider_type(&self) -> &str {
        "flaky"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(!self.failing.load(Ordering::SeqCst))
    }

    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()> {
        self.check()?;
        self.inner.put(key, data, content_type).await
    }

    async fn get(&self, key: &str) -> AppResult<ByteStream> {
        self.check()?;
        self.inner.get(key).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.check()?;
        self.inner.delete(key).await
    }
}

/// Object store whose writes never complete.
#[derive(Debug, Default)]
pub(crate) struct StalledStore;

#[async_trait]
impl ObjectStore for StalledStore {
    fn provider_type(&self) -> &str {
        "stalled"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn put(&self, _key: &str, _data: Bytes, _content_type: &str) -> AppResult<()> {
        std::future::pending().await
    }

    async fn get(&self, _key: &str) -> AppResult<ByteStream> {
        std::future::pending().await
    }

    async fn delete(&self, _key: &str) -> AppResult<()> {
        std::future::pending().await
    }
}

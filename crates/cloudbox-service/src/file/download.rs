//! File download service.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;
use uuid::Uuid;

use cloudbox_core::config::storage::StorageConfig;
use cloudbox_core::result::AppResult;
use cloudbox_core::traits::storage::{ByteStream, ObjectStore};
use cloudbox_database::Catalog;
use cloudbox_entity::file::File;

use crate::context::RequestContext;

/// An open download: the file record plus its content stream.
pub struct FileDownload {
    /// The file being downloaded.
    pub file: File,
    /// Content bytes.
    pub stream: ByteStream,
}

impl std::fmt::Debug for FileDownload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileDownload")
            .field("file", &self.file.id)
            .finish_non_exhaustive()
    }
}

/// Streams stored file content back to its owner.
#[derive(Clone)]
pub struct DownloadService {
    catalog: Arc<Catalog>,
    store: Arc<dyn ObjectStore>,
    timeout: Duration,
}

impl std::fmt::Debug for DownloadService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadService")
            .field("provider", &self.store.provider_type())
            .finish()
    }
}

impl DownloadService {
    /// Creates a new download service.
    pub fn new(catalog: Arc<Catalog>, store: Arc<dyn ObjectStore>, config: StorageConfig) -> Self {
        Self {
            catalog,
            store,
            timeout: Duration::from_secs(config.operation_timeout_seconds),
        }
    }

    /// Open a file owned by the caller for reading.
    pub async fn download(&self, ctx: &RequestContext, id: Uuid) -> AppResult<FileDownload> {
        let file = self.catalog.get_file(ctx.user_id, id).await?;
        let stream = super::bounded(self.timeout, "get", self.store.get(&file.object_key)).await?;

        debug!(user_id = %ctx.user_id, file_id = %file.id, "Download started");
        Ok(FileDownload { file, stream })
    }
}

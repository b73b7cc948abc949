//! File rename and delete.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};
use uuid::Uuid;

use cloudbox_core::config::storage::StorageConfig;
use cloudbox_core::error::AppError;
use cloudbox_core::result::AppResult;
use cloudbox_core::traits::storage::ObjectStore;
use cloudbox_database::Catalog;
use cloudbox_entity::file::File;

use crate::context::RequestContext;

/// Mutations on existing files.
#[derive(Clone)]
pub struct FileService {
    catalog: Arc<Catalog>,
    store: Arc<dyn ObjectStore>,
    timeout: Duration,
}

impl std::fmt::Debug for FileService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileService")
            .field("provider", &self.store.provider_type())
            .finish()
    }
}

impl FileService {
    /// Creates a new file service.
    pub fn new(catalog: Arc<Catalog>, store: Arc<dyn ObjectStore>, config: StorageConfig) -> Self {
        Self {
            catalog,
            store,
            timeout: Duration::from_secs(config.operation_timeout_seconds),
        }
    }

    /// Rename a file. Both the stored and the original name become `name`.
    pub async fn rename(&self, ctx: &RequestContext, id: Uuid, name: &str) -> AppResult<File> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("File name is required"));
        }
        if name.contains('/') {
            return Err(AppError::validation("File name cannot contain '/'"));
        }

        let file = self.catalog.rename_file(ctx.user_id, id, name).await?;
        info!(user_id = %ctx.user_id, file_id = %id, path = %file.path, "File renamed");
        Ok(file)
    }

    /// Delete a file's object, then its record.
    ///
    /// If the object cannot be removed the record is kept.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        let file = self.catalog.get_file(ctx.user_id, id).await?;

        if let Err(e) =
            super::bounded(self.timeout, "delete", self.store.delete(&file.object_key)).await
        {
            error!(file_id = %id, key = %file.object_key, error = %e, "Failed to delete object");
            return Err(e);
        }

        self.catalog.delete_file(ctx.user_id, id).await?;
        info!(user_id = %ctx.user_id, file_id = %id, "File deleted");
        Ok(())
    }
}

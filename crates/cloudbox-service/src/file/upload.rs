//! File upload service.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tracing::{info, warn};

use cloudbox_core::config::storage::StorageConfig;
use cloudbox_core::error::{AppError, ErrorKind};
use cloudbox_core::result::AppResult;
use cloudbox_core::traits::storage::ObjectStore;
use cloudbox_database::Catalog;
use cloudbox_entity::file::{CreateFile, File};
use cloudbox_entity::path;
use cloudbox_storage::object_key;

use crate::context::RequestContext;

/// MIME type assumed when the client declares none.
const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// A single-request upload.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// File name as supplied by the client.
    pub file_name: String,
    /// Declared MIME type, if any.
    pub mime_type: Option<String>,
    /// Target folder path; empty for the top level.
    pub folder_path: String,
    /// File content.
    pub data: Bytes,
}

/// Validates uploads, stores their bytes and records them in the catalog.
#[derive(Clone)]
pub struct UploadService {
    catalog: Arc<Catalog>,
    store: Arc<dyn ObjectStore>,
    config: StorageConfig,
}

impl std::fmt::Debug for UploadService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadService")
            .field("provider", &self.store.provider_type())
            .finish()
    }
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(catalog: Arc<Catalog>, store: Arc<dyn ObjectStore>, config: StorageConfig) -> Self {
        Self {
            catalog,
            store,
            config,
        }
    }

    /// Largest accepted payload in bytes.
    pub fn max_upload_size(&self) -> u64 {
        self.config.max_upload_size_bytes
    }

    /// Store an uploaded file.
    ///
    /// The object is written before the catalog row is inserted, so a
    /// failed write leaves no record behind.
    pub async fn upload(&self, ctx: &RequestContext, req: UploadRequest) -> AppResult<File> {
        let size = req.data.len() as u64;
        if size > self.config.max_upload_size_bytes {
            warn!(user_id = %ctx.user_id, size, "Upload rejected: too large");
            return Err(self.too_large());
        }

        let name = sanitize_file_name(&req.file_name);
        if name.is_empty() {
            return Err(AppError::validation("Invalid filename"));
        }

        let mime_type = req
            .mime_type
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());
        if !self.config.is_mime_allowed(&mime_type) {
            warn!(user_id = %ctx.user_id, mime_type = %mime_type, "Upload rejected: type not allowed");
            return Err(AppError::unsupported_type("File type not allowed"));
        }

        let folder_path = path::normalize(&req.folder_path);
        let (scope, _) = self.catalog.resolve_scope(ctx.user_id, folder_path).await?;

        let key = object_key(ctx.user_id, &name);
        super::bounded(
            self.timeout(),
            "put",
            self.store.put(&key, req.data, &mime_type),
        )
        .await?;

        let file = self
            .catalog
            .create_file(&CreateFile {
                user_id: ctx.user_id,
                folder_id: scope.parent_id(),
                path: path::join(folder_path, &name),
                name,
                original_name: req.file_name,
                object_key: key,
                file_size: size as i64,
                mime_type,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            file_id = %file.id,
            path = %file.path,
            size = file.file_size,
            "Upload completed"
        );
        Ok(file)
    }

    /// The error reported for payloads over the limit.
    pub fn too_large(&self) -> AppError {
        let limit = self.config.max_upload_size_bytes;
        let message = if limit % (1024 * 1024) == 0 {
            format!("File too large. Maximum size is {}MB", limit / (1024 * 1024))
        } else {
            format!("File too large. Maximum size is {limit} bytes")
        };
        AppError::new(ErrorKind::PayloadTooLarge, message)
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.operation_timeout_seconds)
    }
}

/// Replace every character outside `[A-Za-z0-9._-]` with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

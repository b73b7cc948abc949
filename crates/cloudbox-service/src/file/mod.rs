//! File upload, download, rename and delete.

pub mod download;
pub mod service;
pub mod upload;

use std::future::Future;
use std::time::Duration;

use cloudbox_core::error::AppError;
use cloudbox_core::result::AppResult;

pub use download::{DownloadService, FileDownload};
pub use service::FileService;
pub use upload::{UploadRequest, UploadService, sanitize_file_name};

/// Run an object store call, failing with a storage error once `limit` elapses.
pub(crate) async fn bounded<T>(
    limit: Duration,
    operation: &str,
    call: impl Future<Output = AppResult<T>>,
) -> AppResult<T> {
    tokio::time::timeout(limit, call).await.map_err(|_| {
        AppError::storage(format!(
            "Object store {operation} timed out after {}s",
            limit.as_secs()
        ))
    })?
}

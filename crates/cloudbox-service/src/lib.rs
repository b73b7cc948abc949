//! # cloudbox-service
//!
//! Business logic service layer for CloudBox. Services combine the
//! [`Catalog`](cloudbox_database::Catalog) for metadata with an
//! [`ObjectStore`](cloudbox_core::traits::ObjectStore) for bytes.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod file;
pub mod folder;

#[cfg(test)]
pub(crate) mod testing;

pub use context::RequestContext;
pub use file::{DownloadService, FileDownload, FileService, UploadRequest, UploadService};
pub use folder::{FolderListing, FolderService};

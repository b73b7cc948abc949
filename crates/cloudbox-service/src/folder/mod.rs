//! Folder browsing and management.

pub mod service;

pub use service::{FolderListing, FolderService};

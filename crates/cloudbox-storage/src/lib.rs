//! # cloudbox-storage
//!
//! Object store implementations for CloudBox. File bytes go to an
//! S3-compatible service in production; a local directory and an
//! in-memory map serve development and tests.

pub mod key;
pub mod manager;
pub mod providers;

pub use key::object_key;
pub use manager::build_object_store;
pub use providers::{LocalObjectStore, MemoryObjectStore, S3ObjectStore};

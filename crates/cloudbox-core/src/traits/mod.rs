//! Core traits defined in `cloudbox-core` and implemented by other crates.

pub mod storage;

pub use storage::{ByteStream, ObjectStore};

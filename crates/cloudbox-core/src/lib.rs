//! # cloudbox-core
//!
//! Core crate for CloudBox. Contains the configuration schema, the
//! object store trait and the unified error system.
//!
//! This crate has **no** internal dependencies on other CloudBox crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;

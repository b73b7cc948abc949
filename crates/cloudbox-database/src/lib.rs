//! # cloudbox-database
//!
//! PostgreSQL connection management, repository traits with PostgreSQL
//! and in-memory implementations, and the [`Catalog`] that the file and
//! folder services work against.

pub mod catalog;
pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use catalog::Catalog;
pub use connection::DatabasePool;
pub use memory::MemoryCatalog;

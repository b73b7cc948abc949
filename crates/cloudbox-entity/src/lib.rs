//! # cloudbox-entity
//!
//! Domain entity models for CloudBox. Every struct in this crate
//! represents a database table row or a domain value object. Database
//! entities derive `sqlx::FromRow`.

pub mod file;
pub mod folder;
pub mod path;
pub mod user;

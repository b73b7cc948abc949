//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod file;
pub mod folder;
pub mod health;

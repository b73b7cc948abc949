//! Custom Axum extractors.

pub mod auth;
pub mod path;
pub mod validated;

pub use auth::{AuthUser, Session};
pub use path::parse_id;
pub use validated::ValidatedJson;

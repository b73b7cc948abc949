//! Typed path parameter helpers.

use uuid::Uuid;

use cloudbox_core::error::AppError;

/// Parses a resource id from a path segment.
///
/// A malformed id cannot name any row, so it is reported like an unknown one.
pub fn parse_id(s: &str, resource: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(s).map_err(|_| AppError::not_found(format!("{resource} not found")))
}

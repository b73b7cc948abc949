//! Request DTOs with validation.
//!
//! Fields default to empty so that a missing field reaches the service
//! layer, which reports which fields are required.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterRequest {
    /// Desired username.
    #[validate(length(max = 255, message = "Username is too long"))]
    pub username: String,
    /// Contact email.
    #[validate(length(max = 255, message = "Email is too long"))]
    pub email: String,
    /// Plain-text password.
    #[validate(length(max = 1024, message = "Password is too long"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    /// Username or email.
    #[validate(length(max = 255, message = "Username is too long"))]
    pub username: String,
    /// Plain-text password.
    #[validate(length(max = 1024, message = "Password is too long"))]
    pub password: String,
}

/// Create folder request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CreateFolderRequest {
    /// New folder name.
    #[validate(length(max = 255, message = "Folder name is too long"))]
    pub name: String,
    /// Path of the parent folder; empty for the top level.
    pub path: String,
}

/// Rename request body for files and folders.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RenameRequest {
    /// New name.
    #[validate(length(max = 255, message = "Name is too long"))]
    pub name: String,
}

/// `?path=` query used by browse and upload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PathQuery {
    /// Folder path; empty for the top level.
    pub path: String,
}

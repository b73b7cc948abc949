//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cloudbox_entity::file::File;
use cloudbox_entity::folder::Folder;
use cloudbox_entity::user::User;
use cloudbox_service::FolderListing;

/// User summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Username.
    pub username: String,
    /// Email.
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

/// `{ "user": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEnvelope {
    /// The user.
    pub user: UserResponse,
}

/// Session check result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthCheckResponse {
    /// Whether the request carried a valid session.
    pub authenticated: bool,
    /// The session's user, when authenticated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

/// Folder as listed or returned from mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderResponse {
    pub id: Uuid,
    pub name: String,
    pub path: String,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Folder> for FolderResponse {
    fn from(f: Folder) -> Self {
        Self {
            id: f.id,
            name: f.name,
            path: f.path,
            parent_id: f.parent_id,
            created_at: f.created_at,
            updated_at: f.updated_at,
        }
    }
}

/// File metadata. The object key is never exposed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResponse {
    pub id: Uuid,
    pub name: String,
    pub original_name: String,
    pub folder_id: Option<Uuid>,
    pub file_size: i64,
    pub mime_type: String,
    pub path: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<File> for FileResponse {
    fn from(f: File) -> Self {
        Self {
            id: f.id,
            name: f.name,
            original_name: f.original_name,
            folder_id: f.folder_id,
            file_size: f.file_size,
            mime_type: f.mime_type,
            path: f.path,
            created_at: f.created_at,
            updated_at: f.updated_at,
        }
    }
}

/// `{ "folder": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderEnvelope {
    pub folder: FolderResponse,
}

/// `{ "file": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEnvelope {
    pub file: FileResponse,
}

/// Browse result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseResponse {
    /// The listed location, normalized.
    pub current_path: String,
    /// Direct child folders.
    pub folders: Vec<FolderResponse>,
    /// Direct child files.
    pub files: Vec<FileResponse>,
}

impl From<FolderListing> for BrowseResponse {
    fn from(listing: FolderListing) -> Self {
        Self {
            current_path: listing.current_path,
            folders: listing.folders.into_iter().map(Into::into).collect(),
            files: listing.files.into_iter().map(Into::into).collect(),
        }
    }
}

/// `{ "success": true }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` when every dependency answered, `degraded` otherwise.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Database status.
    pub database: String,
    /// Object store status.
    pub storage: String,
}

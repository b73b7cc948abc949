//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A file whose bytes live in the object store.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: Uuid,
    /// Sanitized stored name.
    pub name: String,
    /// Name as supplied by the uploader. Used for downloads.
    pub original_name: String,
    /// The file owner.
    pub user_id: Uuid,
    /// The folder containing this file (null for top level).
    pub folder_id: Option<Uuid>,
    /// Object store key. Never exposed to clients.
    #[serde(skip_serializing, default)]
    pub object_key: String,
    /// File size in bytes.
    pub file_size: i64,
    /// MIME type declared at upload.
    pub mime_type: String,
    /// Materialized path, e.g. `docs/report.pdf`.
    pub path: String,
    /// When the file was created.
    pub created_at: DateTime<Utc>,
    /// When the file was last updated.
    pub updated_at: DateTime<Utc>,
}

impl File {
    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
            .map(|ext| ext.to_lowercase())
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone)]
pub struct CreateFile {
    /// The file owner.
    pub user_id: Uuid,
    /// Containing folder (None for top level).
    pub folder_id: Option<Uuid>,
    /// Sanitized stored name.
    pub name: String,
    /// Name as supplied by the uploader.
    pub original_name: String,
    /// Object store key the bytes were written under.
    pub object_key: String,
    /// Size in bytes.
    pub file_size: i64,
    /// Declared MIME type.
    pub mime_type: String,
    /// Full materialized path.
    pub path: String,
}

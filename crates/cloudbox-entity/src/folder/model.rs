//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A folder in a user's hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: Uuid,
    /// Folder name (last path segment).
    pub name: String,
    /// The folder owner.
    pub user_id: Uuid,
    /// Parent folder ID (null for top-level folders).
    pub parent_id: Option<Uuid>,
    /// Materialized path, e.g. `docs/reports`. Unique per user.
    pub path: String,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this is a top-level folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// The scope selecting this folder's direct children.
    pub fn scope(&self) -> ParentScope {
        ParentScope::Folder(self.id)
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone)]
pub struct CreateFolder {
    /// The folder owner.
    pub user_id: Uuid,
    /// Parent folder (None for top level).
    pub parent_id: Option<Uuid>,
    /// Folder name.
    pub name: String,
    /// Full materialized path.
    pub path: String,
}

/// Which container a listing targets.
///
/// Top-level items have a null parent column, so the two cases are
/// queried with distinct statements rather than a nullable parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentScope {
    /// Items with no parent.
    Root,
    /// Items whose parent is the given folder.
    Folder(Uuid),
}

impl ParentScope {
    /// The parent id, if any.
    pub fn parent_id(self) -> Option<Uuid> {
        match self {
            Self::Root => None,
            Self::Folder(id) => Some(id),
        }
    }
}

impl From<Option<Uuid>> for ParentScope {
    fn from(parent: Option<Uuid>) -> Self {
        parent.map_or(Self::Root, Self::Folder)
    }
}

//! Path-addressed folder and file catalog.
//!
//! Resolves client-supplied location strings to folder rows, computes
//! materialized paths for new and renamed items, and keeps every
//! operation scoped to the requesting user.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use cloudbox_core::error::{AppError, ErrorKind};
use cloudbox_core::result::AppResult;
use cloudbox_entity::file::{CreateFile, File};
use cloudbox_entity::folder::{CreateFolder, Folder, ParentScope};
use cloudbox_entity::path;

use crate::repositories::{FileRepository, FolderRepository};

/// Folder and file metadata access for the service layer.
#[derive(Clone)]
pub struct Catalog {
    folders: Arc<dyn FolderRepository>,
    files: Arc<dyn FileRepository>,
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog").finish_non_exhaustive()
    }
}

impl Catalog {
    /// Create a catalog over the given repositories.
    pub fn new(folders: Arc<dyn FolderRepository>, files: Arc<dyn FileRepository>) -> Self {
        Self { folders, files }
    }

    /// Resolve an exact folder path for `user_id`.
    pub async fn resolve_folder(&self, user_id: Uuid, folder_path: &str) -> AppResult<Folder> {
        self.folders
            .find_by_path(user_id, folder_path)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    /// Resolve a location string to a listing scope.
    ///
    /// The empty string is the top level; anything else must name an
    /// existing folder.
    pub async fn resolve_scope(
        &self,
        user_id: Uuid,
        folder_path: &str,
    ) -> AppResult<(ParentScope, Option<Folder>)> {
        if folder_path.is_empty() {
            return Ok((ParentScope::Root, None));
        }
        let folder = self.resolve_folder(user_id, folder_path).await?;
        Ok((folder.scope(), Some(folder)))
    }

    /// Direct child folders and files of `scope`, each ordered by name.
    pub async fn list_children(
        &self,
        user_id: Uuid,
        scope: ParentScope,
    ) -> AppResult<(Vec<Folder>, Vec<File>)> {
        let folders = self.folders.list(user_id, scope).await?;
        let files = self.files.list(user_id, scope).await?;
        Ok((folders, files))
    }

    /// Create a folder named `name` under `parent_path`.
    pub async fn create_folder(
        &self,
        user_id: Uuid,
        name: &str,
        parent_path: &str,
    ) -> AppResult<Folder> {
        let (scope, _) = self.resolve_scope(user_id, parent_path).await.map_err(|e| {
            if e.kind == ErrorKind::NotFound {
                AppError::not_found("Parent folder not found")
            } else {
                e
            }
        })?;

        let data = CreateFolder {
            user_id,
            parent_id: scope.parent_id(),
            name: name.to_string(),
            path: path::join(parent_path, name),
        };
        debug!(user_id = %user_id, path = %data.path, "Creating folder");
        self.folders.create(&data).await
    }

    /// Insert a file record whose bytes are already stored.
    pub async fn create_file(&self, data: &CreateFile) -> AppResult<File> {
        self.files.create(data).await
    }

    /// Find a folder by id.
    pub async fn get_folder(&self, user_id: Uuid, id: Uuid) -> AppResult<Folder> {
        self.folders
            .find_by_id(user_id, id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    /// Find a file by id.
    pub async fn get_file(&self, user_id: Uuid, id: Uuid) -> AppResult<File> {
        self.files
            .find_by_id(user_id, id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))
    }

    /// Rename a folder, rewriting only the last segment of its own path.
    ///
    /// Paths stored on descendants still carry the old segment afterwards.
    pub async fn rename_folder(&self, user_id: Uuid, id: Uuid, new_name: &str) -> AppResult<Folder> {
        let folder = self.get_folder(user_id, id).await?;
        let new_path = path::replace_last_segment(&folder.path, new_name);
        self.folders
            .rename(user_id, id, new_name, &new_path)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    /// Rename a file, rewriting only the last segment of its path.
    pub async fn rename_file(&self, user_id: Uuid, id: Uuid, new_name: &str) -> AppResult<File> {
        let file = self.get_file(user_id, id).await?;
        let new_path = path::replace_last_segment(&file.path, new_name);
        self.files
            .rename(user_id, id, new_name, &new_path)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))
    }

    /// Delete a folder and all of its descendant rows.
    pub async fn delete_folder(&self, user_id: Uuid, id: Uuid) -> AppResult<()> {
        if self.folders.delete(user_id, id).await? {
            Ok(())
        } else {
            Err(AppError::not_found("Folder not found"))
        }
    }

    /// Delete a single file row.
    pub async fn delete_file(&self, user_id: Uuid, id: Uuid) -> AppResult<()> {
        if self.files.delete(user_id, id).await? {
            Ok(())
        } else {
            Err(AppError::not_found("File not found"))
        }
    }
}

//! Folder service: browse, create, rename and delete.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use cloudbox_core::error::{AppError, ErrorKind};
use cloudbox_core::result::AppResult;
use cloudbox_database::Catalog;
use cloudbox_entity::file::File;
use cloudbox_entity::folder::Folder;
use cloudbox_entity::path;

use crate::context::RequestContext;

/// Contents of one location in a user's tree.
#[derive(Debug, Clone)]
pub struct FolderListing {
    /// The normalized location that was listed.
    pub current_path: String,
    /// Direct child folders, ordered by name.
    pub folders: Vec<Folder>,
    /// Direct child files, ordered by name.
    pub files: Vec<File>,
}

/// Folder operations scoped to the requesting user.
#[derive(Debug, Clone)]
pub struct FolderService {
    catalog: Arc<Catalog>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// List the folders and files directly under `location`.
    ///
    /// A location that does not resolve lists as empty rather than failing.
    pub async fn browse(&self, ctx: &RequestContext, location: &str) -> AppResult<FolderListing> {
        let current_path = path::normalize(location).to_string();

        let scope = match self.catalog.resolve_scope(ctx.user_id, &current_path).await {
            Ok((scope, _)) => scope,
            Err(e) if e.kind == ErrorKind::NotFound => {
                return Ok(FolderListing {
                    current_path,
                    folders: Vec::new(),
                    files: Vec::new(),
                });
            }
            Err(e) => return Err(e),
        };

        let (folders, files) = self.catalog.list_children(ctx.user_id, scope).await?;
        Ok(FolderListing {
            current_path,
            folders,
            files,
        })
    }

    /// Create a folder named `name` inside `parent_path`.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        name: &str,
        parent_path: &str,
    ) -> AppResult<Folder> {
        let name = validate_folder_name(name)?;
        let folder = self
            .catalog
            .create_folder(ctx.user_id, name, path::normalize(parent_path))
            .await
            .map_err(|e| match e.kind {
                ErrorKind::Conflict => AppError::conflict("Folder already exists"),
                _ => e,
            })?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            path = %folder.path,
            "Folder created"
        );
        Ok(folder)
    }

    /// Rename a folder in place.
    ///
    /// Only the folder's own path changes; stored paths of its descendants
    /// keep the old segment.
    pub async fn rename(&self, ctx: &RequestContext, id: Uuid, name: &str) -> AppResult<Folder> {
        let name = validate_folder_name(name)?;
        let folder = self
            .catalog
            .rename_folder(ctx.user_id, id, name)
            .await
            .map_err(|e| match e.kind {
                ErrorKind::Conflict => AppError::conflict("Folder name already exists"),
                _ => e,
            })?;

        info!(user_id = %ctx.user_id, folder_id = %id, path = %folder.path, "Folder renamed");
        Ok(folder)
    }

    /// Delete a folder and, through the catalog cascade, everything in it.
    ///
    /// Objects belonging to files beneath the folder stay in the object
    /// store.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        self.catalog.delete_folder(ctx.user_id, id).await?;
        info!(user_id = %ctx.user_id, folder_id = %id, "Folder deleted");
        Ok(())
    }
}

/// Trim and check a folder name. Slashes would corrupt materialized paths.
fn validate_folder_name(name: &str) -> AppResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Folder name is required"));
    }
    if name.contains('/') {
        return Err(AppError::validation("Folder name cannot contain '/'"));
    }
    Ok(name)
}

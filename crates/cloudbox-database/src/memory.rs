//! In-memory repository implementations.
//!
//! Used for tests and for running the server without PostgreSQL. The
//! unique and cascade rules of the relational schema are enforced here
//! by hand so both backends behave alike.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use cloudbox_core::error::AppError;
use cloudbox_core::result::AppResult;
use cloudbox_entity::file::{CreateFile, File};
use cloudbox_entity::folder::{CreateFolder, Folder, ParentScope};
use cloudbox_entity::user::{CreateUser, User};

use crate::repositories::{FileRepository, FolderRepository, UserRepository};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    folders: HashMap<Uuid, Folder>,
    files: HashMap<Uuid, File>,
}

impl Tables {
    /// Remove a folder and every folder and file beneath it.
    fn cascade_folder(&mut self, root: Uuid) {
        let mut pending = vec![root];
        while let Some(id) = pending.pop() {
            self.folders.remove(&id);
            self.files.retain(|_, f| f.folder_id != Some(id));
            pending.extend(
                self.folders
                    .values()
                    .filter(|f| f.parent_id == Some(id))
                    .map(|f| f.id),
            );
        }
    }

    fn folder_path_taken(&self, user_id: Uuid, path: &str, except: Option<Uuid>) -> bool {
        self.folders
            .values()
            .any(|f| f.user_id == user_id && f.path == path && Some(f.id) != except)
    }
}

/// Process-local catalog and account store guarded by a single lock.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    tables: RwLock<Tables>,
}

impl MemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delete a user together with everything they own.
    pub async fn remove_user(&self, user_id: Uuid) -> bool {
        let mut tables = self.tables.write().await;
        tables.folders.retain(|_, f| f.user_id != user_id);
        tables.files.retain(|_, f| f.user_id != user_id);
        tables.users.remove(&user_id).is_some()
    }

    /// Number of file rows across all users.
    pub async fn file_count(&self) -> usize {
        self.tables.read().await.files.len()
    }
}

#[async_trait]
impl UserRepository for MemoryCatalog {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_login(&self, login: &str) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == login || u.email == login)
            .cloned())
    }

    async fn exists_by_username_or_email(&self, username: &str, email: &str) -> AppResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .any(|u| u.username == username || u.email == email))
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .values()
            .any(|u| u.username == data.username || u.email == data.email)
        {
            return Err(AppError::conflict("User already exists"));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: data.username.clone(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl FolderRepository for MemoryCatalog {
    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<Folder>> {
        let tables = self.tables.read().await;
        Ok(tables
            .folders
            .get(&id)
            .filter(|f| f.user_id == user_id)
            .cloned())
    }

    async fn find_by_path(&self, user_id: Uuid, path: &str) -> AppResult<Option<Folder>> {
        let tables = self.tables.read().await;
        Ok(tables
            .folders
            .values()
            .find(|f| f.user_id == user_id && f.path == path)
            .cloned())
    }

    async fn list(&self, user_id: Uuid, scope: ParentScope) -> AppResult<Vec<Folder>> {
        let tables = self.tables.read().await;
        let parent = scope.parent_id();
        let mut folders: Vec<Folder> = tables
            .folders
            .values()
            .filter(|f| f.user_id == user_id && f.parent_id == parent)
            .cloned()
            .collect();
        folders.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(folders)
    }

    async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        let mut tables = self.tables.write().await;
        if tables.folder_path_taken(data.user_id, &data.path, None) {
            return Err(AppError::conflict(format!(
                "Folder '{}' already exists",
                data.path
            )));
        }

        let now = Utc::now();
        let folder = Folder {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            user_id: data.user_id,
            parent_id: data.parent_id,
            path: data.path.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.folders.insert(folder.id, folder.clone());
        Ok(folder)
    }

    async fn rename(
        &self,
        user_id: Uuid,
        id: Uuid,
        name: &str,
        path: &str,
    ) -> AppResult<Option<Folder>> {
        let mut tables = self.tables.write().await;
        if !tables.folders.get(&id).is_some_and(|f| f.user_id == user_id) {
            return Ok(None);
        }
        if tables.folder_path_taken(user_id, path, Some(id)) {
            return Err(AppError::conflict(format!("Folder '{path}' already exists")));
        }

        let Some(folder) = tables.folders.get_mut(&id) else {
            return Ok(None);
        };
        folder.name = name.to_string();
        folder.path = path.to_string();
        folder.updated_at = Utc::now();
        Ok(Some(folder.clone()))
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if !tables.folders.get(&id).is_some_and(|f| f.user_id == user_id) {
            return Ok(false);
        }
        tables.cascade_folder(id);
        Ok(true)
    }
}

#[async_trait]
impl FileRepository for MemoryCatalog {
    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<File>> {
        let tables = self.tables.read().await;
        Ok(tables
            .files
            .get(&id)
            .filter(|f| f.user_id == user_id)
            .cloned())
    }

    async fn list(&self, user_id: Uuid, scope: ParentScope) -> AppResult<Vec<File>> {
        let tables = self.tables.read().await;
        let parent = scope.parent_id();
        let mut files: Vec<File> = tables
            .files
            .values()
            .filter(|f| f.user_id == user_id && f.folder_id == parent)
            .cloned()
            .collect();
        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }

    async fn create(&self, data: &CreateFile) -> AppResult<File> {
        let mut tables = self.tables.write().await;
        if tables.files.values().any(|f| f.object_key == data.object_key) {
            return Err(AppError::conflict("Object key already in use"));
        }

        let now = Utc::now();
        let file = File {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            original_name: data.original_name.clone(),
            user_id: data.user_id,
            folder_id: data.folder_id,
            object_key: data.object_key.clone(),
            file_size: data.file_size,
            mime_type: data.mime_type.clone(),
            path: data.path.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.files.insert(file.id, file.clone());
        Ok(file)
    }

    async fn rename(
        &self,
        user_id: Uuid,
        id: Uuid,
        name: &str,
        path: &str,
    ) -> AppResult<Option<File>> {
        let mut tables = self.tables.write().await;
        let Some(file) = tables.files.get_mut(&id).filter(|f| f.user_id == user_id) else {
            return Ok(None);
        };
        file.name = name.to_string();
        file.original_name = name.to_string();
        file.path = path.to_string();
        file.updated_at = Utc::now();
        Ok(Some(file.clone()))
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if !tables.files.get(&id).is_some_and(|f| f.user_id == user_id) {
            return Ok(false);
        }
        Ok(tables.files.remove(&id).is_some())
    }
}

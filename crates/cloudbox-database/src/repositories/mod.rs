//! Repository traits and their PostgreSQL implementations.
//!
//! Every folder and file lookup takes the owner's id; a row owned by
//! somebody else is indistinguishable from a missing one.

pub mod file;
pub mod folder;
pub mod user;

use async_trait::async_trait;
use uuid::Uuid;

use cloudbox_core::result::AppResult;
use cloudbox_entity::file::{CreateFile, File};
use cloudbox_entity::folder::{CreateFolder, Folder, ParentScope};
use cloudbox_entity::user::{CreateUser, User};

pub use file::PgFileRepository;
pub use folder::PgFolderRepository;
pub use user::PgUserRepository;

/// Account storage.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user whose username or email equals `login`.
    async fn find_by_login(&self, login: &str) -> AppResult<Option<User>>;

    /// Whether either the username or the email is already taken.
    async fn exists_by_username_or_email(&self, username: &str, email: &str) -> AppResult<bool>;

    /// Insert a user. A duplicate username or email is a `Conflict`.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;
}

/// Folder rows.
#[async_trait]
pub trait FolderRepository: Send + Sync + 'static {
    /// Find a folder by id, scoped to its owner.
    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<Folder>>;

    /// Find a folder by exact materialized path.
    async fn find_by_path(&self, user_id: Uuid, path: &str) -> AppResult<Option<Folder>>;

    /// Direct child folders of `scope`, ordered by name.
    async fn list(&self, user_id: Uuid, scope: ParentScope) -> AppResult<Vec<Folder>>;

    /// Insert a folder. A duplicate `(user_id, path)` is a `Conflict`.
    async fn create(&self, data: &CreateFolder) -> AppResult<Folder>;

    /// Set name and path of a single folder. Descendants are not touched.
    async fn rename(
        &self,
        user_id: Uuid,
        id: Uuid,
        name: &str,
        path: &str,
    ) -> AppResult<Option<Folder>>;

    /// Delete a folder and, by cascade, everything beneath it.
    async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<bool>;
}

/// File rows.
#[async_trait]
pub trait FileRepository: Send + Sync + 'static {
    /// Find a file by id, scoped to its owner.
    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<File>>;

    /// Files directly inside `scope`, ordered by name.
    async fn list(&self, user_id: Uuid, scope: ParentScope) -> AppResult<Vec<File>>;

    /// Insert a file record.
    async fn create(&self, data: &CreateFile) -> AppResult<File>;

    /// Set name, original name and path of a file.
    async fn rename(&self, user_id: Uuid, id: Uuid, name: &str, path: &str)
    -> AppResult<Option<File>>;

    /// Delete a file record.
    async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<bool>;
}

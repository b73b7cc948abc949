//! PostgreSQL folder repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use cloudbox_core::error::{AppError, ErrorKind};
use cloudbox_core::result::AppResult;
use cloudbox_entity::folder::{CreateFolder, Folder, ParentScope};

use super::FolderRepository;

/// Folder queries against the `folders` table.
///
/// Names are ordered with the `C` collation so listings sort by byte
/// value regardless of the database locale.
#[derive(Debug, Clone)]
pub struct PgFolderRepository {
    pool: PgPool,
}

impl PgFolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(e: sqlx::Error, path: &str, action: &'static str) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::conflict(format!("Folder '{path}' already exists"))
        }
        _ => AppError::with_source(ErrorKind::Database, action, e),
    }
}

#[async_trait]
impl FolderRepository for PgFolderRepository {
    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    async fn find_by_path(&self, user_id: Uuid, path: &str) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE user_id = $1 AND path = $2")
            .bind(user_id)
            .bind(path)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find folder by path", e)
            })
    }

    async fn list(&self, user_id: Uuid, scope: ParentScope) -> AppResult<Vec<Folder>> {
        let query = match scope {
            ParentScope::Root => sqlx::query_as::<_, Folder>(
                "SELECT * FROM folders WHERE user_id = $1 AND parent_id IS NULL \
                 ORDER BY name COLLATE \"C\" ASC",
            )
            .bind(user_id),
            ParentScope::Folder(parent_id) => sqlx::query_as::<_, Folder>(
                "SELECT * FROM folders WHERE user_id = $1 AND parent_id = $2 \
                 ORDER BY name COLLATE \"C\" ASC",
            )
            .bind(user_id)
            .bind(parent_id),
        };

        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folders", e))
    }

    async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (name, user_id, parent_id, path) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&data.name)
        .bind(data.user_id)
        .bind(data.parent_id)
        .bind(&data.path)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &data.path, "Failed to create folder"))
    }

    async fn rename(
        &self,
        user_id: Uuid,
        id: Uuid,
        name: &str,
        path: &str,
    ) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET name = $3, path = $4, updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(user_id)
        .bind(name)
        .bind(path)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, path, "Failed to rename folder"))
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM folders WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete folder", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}

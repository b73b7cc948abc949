//! PostgreSQL file repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use cloudbox_core::error::{AppError, ErrorKind};
use cloudbox_core::result::AppResult;
use cloudbox_entity::file::{CreateFile, File};
use cloudbox_entity::folder::ParentScope;

use super::FileRepository;

/// File queries against the `files` table.
#[derive(Debug, Clone)]
pub struct PgFileRepository {
    pool: PgPool,
}

impl PgFileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileRepository for PgFileRepository {
    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    async fn list(&self, user_id: Uuid, scope: ParentScope) -> AppResult<Vec<File>> {
        let query = match scope {
            ParentScope::Root => sqlx::query_as::<_, File>(
                "SELECT * FROM files WHERE user_id = $1 AND folder_id IS NULL \
                 ORDER BY name COLLATE \"C\" ASC",
            )
            .bind(user_id),
            ParentScope::Folder(folder_id) => sqlx::query_as::<_, File>(
                "SELECT * FROM files WHERE user_id = $1 AND folder_id = $2 \
                 ORDER BY name COLLATE \"C\" ASC",
            )
            .bind(user_id)
            .bind(folder_id),
        };

        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    async fn create(&self, data: &CreateFile) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "INSERT INTO files \
             (name, original_name, user_id, folder_id, object_key, file_size, mime_type, path) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.original_name)
        .bind(data.user_id)
        .bind(data.folder_id)
        .bind(&data.object_key)
        .bind(data.file_size)
        .bind(&data.mime_type)
        .bind(&data.path)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create file record", e))
    }

    async fn rename(
        &self,
        user_id: Uuid,
        id: Uuid,
        name: &str,
        path: &str,
    ) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>(
            "UPDATE files SET name = $3, original_name = $3, path = $4, updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(user_id)
        .bind(name)
        .bind(path)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename file", e))
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))?;
        Ok(result.rows_affected() > 0)
    }
}

//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use cloudbox_auth::SessionManager;
use cloudbox_core::config::AppConfig;
use cloudbox_core::traits::storage::ObjectStore;
use cloudbox_database::Catalog;
use cloudbox_database::DatabasePool;
use cloudbox_database::repositories::{
    FileRepository, FolderRepository, PgFileRepository, PgFolderRepository, PgUserRepository,
    UserRepository,
};
use cloudbox_service::{DownloadService, FileService, FolderService, UploadService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool; absent with the memory backend
    pub db_pool: Option<DatabasePool>,
    /// Object store holding file content
    pub object_store: Arc<dyn ObjectStore>,

    // ── Auth ─────────────────────────────────────────────────
    /// Registration, login and token resolution
    pub session_manager: Arc<SessionManager>,

    // ── Services ─────────────────────────────────────────────
    /// Folder browse and mutations
    pub folder_service: Arc<FolderService>,
    /// Upload validation and storage
    pub upload_service: Arc<UploadService>,
    /// Download streaming
    pub download_service: Arc<DownloadService>,
    /// File rename and delete
    pub file_service: Arc<FileService>,
}

impl AppState {
    /// Wire state from already constructed repositories and object store.
    pub fn from_parts(
        config: AppConfig,
        db_pool: Option<DatabasePool>,
        users: Arc<dyn UserRepository>,
        folders: Arc<dyn FolderRepository>,
        files: Arc<dyn FileRepository>,
        object_store: Arc<dyn ObjectStore>,
    ) -> Self {
        let catalog = Arc::new(Catalog::new(folders, files));
        let storage = config.storage.clone();

        let session_manager = Arc::new(SessionManager::new(&config.auth, users));
        let folder_service = Arc::new(FolderService::new(Arc::clone(&catalog)));
        let upload_service = Arc::new(UploadService::new(
            Arc::clone(&catalog),
            Arc::clone(&object_store),
            storage.clone(),
        ));
        let download_service = Arc::new(DownloadService::new(
            Arc::clone(&catalog),
            Arc::clone(&object_store),
            storage.clone(),
        ));
        let file_service = Arc::new(FileService::new(
            catalog,
            Arc::clone(&object_store),
            storage,
        ));

        Self {
            config: Arc::new(config),
            db_pool,
            object_store,
            session_manager,
            folder_service,
            upload_service,
            download_service,
            file_service,
        }
    }

    /// Wire state over PostgreSQL repositories.
    pub fn with_postgres(
        config: AppConfig,
        db_pool: DatabasePool,
        object_store: Arc<dyn ObjectStore>,
    ) -> Self {
        let pool = db_pool.pool().clone();
        Self::from_parts(
            config,
            Some(db_pool),
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgFolderRepository::new(pool.clone())),
            Arc::new(PgFileRepository::new(pool)),
            object_store,
        )
    }
}

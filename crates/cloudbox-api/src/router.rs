//! Route definitions for the CloudBox HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Room for multipart framing on top of the largest accepted file.
const MULTIPART_OVERHEAD_BYTES: u64 = 1024 * 1024;

/// Build the Axum router with all routes and request logging.
pub fn build_router(state: AppState) -> Router {
    let max_body = state
        .config
        .storage
        .max_upload_size_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);
    let max_body = usize::try_from(max_body).unwrap_or(usize::MAX);

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(folder_routes())
        .merge(file_routes().layer(DefaultBodyLimit::max(max_body)))
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Account and session endpoints
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
        .route("/auth/check", get(handlers::auth::check))
}

/// Browse and folder mutations
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route("/browse", get(handlers::folder::browse))
        .route("/folder", post(handlers::folder::create_folder))
        .route(
            "/folder/{id}",
            put(handlers::folder::rename_folder).delete(handlers::folder::delete_folder),
        )
}

/// Upload, download, rename, delete
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/upload", post(handlers::file::upload))
        .route("/file/{id}", delete(handlers::file::delete_file))
        .route("/file/{id}/download", get(handlers::file::download))
        .route("/file/{id}/rename", put(handlers::file::rename_file))
}

/// Liveness and dependency status
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

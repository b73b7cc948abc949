//! Folder handlers: browse, create, rename, delete.

use axum::Json;
use axum::extract::{Path, Query, State};

use crate::dto::request::{CreateFolderRequest, PathQuery, RenameRequest};
use crate::dto::response::{BrowseResponse, FolderEnvelope, SuccessResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson, parse_id};
use crate::state::AppState;

/// GET /api/browse?path=
pub async fn browse(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PathQuery>,
) -> Result<Json<BrowseResponse>, ApiError> {
    let listing = state.folder_service.browse(&auth, &query.path).await?;
    Ok(Json(listing.into()))
}

/// POST /api/folder
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateFolderRequest>,
) -> Result<Json<FolderEnvelope>, ApiError> {
    let folder = state
        .folder_service
        .create(&auth, &req.name, &req.path)
        .await?;
    Ok(Json(FolderEnvelope {
        folder: folder.into(),
    }))
}

/// PUT /api/folder/{id}
pub async fn rename_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<RenameRequest>,
) -> Result<Json<FolderEnvelope>, ApiError> {
    let id = parse_id(&id, "Folder")?;
    let folder = state.folder_service.rename(&auth, id, &req.name).await?;
    Ok(Json(FolderEnvelope {
        folder: folder.into(),
    }))
}

/// DELETE /api/folder/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let id = parse_id(&id, "Folder")?;
    state.folder_service.delete(&auth, id).await?;
    Ok(Json(SuccessResponse::ok()))
}

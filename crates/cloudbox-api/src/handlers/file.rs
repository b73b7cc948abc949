//! File handlers: upload, download, rename, delete.

use axum::Json;
use axum::body::Body;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use bytes::Bytes;
use tracing::warn;

use cloudbox_core::error::AppError;
use cloudbox_service::UploadRequest;

use crate::dto::request::{PathQuery, RenameRequest};
use crate::dto::response::{FileEnvelope, SuccessResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson, parse_id};
use crate::state::AppState;

/// Multipart field carrying the upload.
const FILE_FIELD: &str = "file";

/// POST /api/upload?path= (multipart field `file`)
pub async fn upload(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PathQuery>,
    mut multipart: Multipart,
) -> Result<Json<FileEnvelope>, ApiError> {
    let mut upload: Option<(String, Option<String>, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&state, e))?
    {
        if field.name() != Some(FILE_FIELD) || upload.is_some() {
            continue;
        }

        let file_name = field.file_name().unwrap_or("").to_string();
        let mime_type = field.content_type().map(String::from);
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(&state, e))?;
        upload = Some((file_name, mime_type, data));
    }

    let Some((file_name, mime_type, data)) = upload else {
        return Err(AppError::validation("No file uploaded").into());
    };

    let file = state
        .upload_service
        .upload(
            &auth,
            UploadRequest {
                file_name,
                mime_type,
                folder_path: query.path,
                data,
            },
        )
        .await?;

    Ok(Json(FileEnvelope { file: file.into() }))
}

/// GET /api/file/{id}/download
pub async fn download(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id, "File")?;
    let download = state.download_service.download(&auth, id).await?;
    let file = download.file;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, &file.mime_type)
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition(&file.original_name),
        )
        .header(header::CONTENT_LENGTH, file.file_size.to_string())
        .body(Body::from_stream(download.stream))
        .map_err(|e| AppError::internal(format!("Failed to build response: {e}")).into())
}

/// PUT /api/file/{id}/rename
pub async fn rename_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<RenameRequest>,
) -> Result<Json<FileEnvelope>, ApiError> {
    let id = parse_id(&id, "File")?;
    let file = state.file_service.rename(&auth, id, &req.name).await?;
    Ok(Json(FileEnvelope { file: file.into() }))
}

/// DELETE /api/file/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let id = parse_id(&id, "File")?;
    state.file_service.delete(&auth, id).await?;
    Ok(Json(SuccessResponse::ok()))
}

fn multipart_error(state: &AppState, err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        warn!("Upload rejected: request body over limit");
        return state.upload_service.too_large();
    }
    AppError::validation(format!("Invalid multipart body: {}", err.body_text()))
}

/// `attachment` disposition carrying the original name.
///
/// The quoted `filename` gets an ASCII-only fallback; `filename*` carries
/// the exact name percent-encoded.
fn content_disposition(name: &str) -> String {
    let fallback: String = name
        .chars()
        .map(|c| {
            if c.is_ascii() && !c.is_ascii_control() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        urlencoding::encode(name)
    )
}

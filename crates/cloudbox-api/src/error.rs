//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use cloudbox_core::error::{AppError, ErrorKind};

/// Message sent to clients in place of server-side failure details.
const INTERNAL_MESSAGE: &str = "Internal server error";

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Human-readable message.
    pub error: String,
    /// Machine-readable error code.
    pub code: String,
}

/// An [`AppError`] on its way out of a handler.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// The status code this error is reported with.
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.0.kind.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let err = self.0;

        let message = if err.kind.is_server_error() {
            match &err.source {
                Some(source) => tracing::error!(
                    kind = %err.kind,
                    error = %err.message,
                    source = %source,
                    "Request failed"
                ),
                None => tracing::error!(kind = %err.kind, error = %err.message, "Request failed"),
            }
            INTERNAL_MESSAGE.to_string()
        } else {
            err.message
        };

        let code = match err.kind {
            ErrorKind::Database | ErrorKind::Configuration | ErrorKind::Serialization => {
                ErrorKind::Internal.to_string()
            }
            kind => kind.to_string(),
        };

        (status, Json(ApiErrorResponse { error: message, code })).into_response()
    }
}

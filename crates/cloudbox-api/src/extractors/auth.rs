//! Session extractors: read the session token from the cookie (or a Bearer
//! header) and resolve it through the session manager.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use cloudbox_auth::SessionState;
use cloudbox_core::error::AppError;
use cloudbox_entity::user::User;
use cloudbox_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// The resolved session of the current request, authenticated or not.
#[derive(Debug, Clone)]
pub struct Session(pub SessionState);

impl FromRequestParts<AppState> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(parts, &state.config.auth.cookie_name);
        let session = state.session_manager.resolve(token.as_deref()).await?;
        Ok(Session(session))
    }
}

/// Extracted authenticated user available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The account behind the session.
    pub user: User,
    context: RequestContext,
}

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.context
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.context
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Session(session) = Session::from_request_parts(parts, state).await?;
        match session {
            SessionState::Authenticated(user) => Ok(AuthUser {
                context: RequestContext::from(&user),
                user,
            }),
            SessionState::Unauthenticated => {
                Err(AppError::authentication("Authentication required").into())
            }
        }
    }
}

/// Session cookie first, then `Authorization: Bearer`.
fn session_token(parts: &Parts, cookie_name: &str) -> Option<String> {
    let jar = CookieJar::from_headers(&parts.headers);
    if let Some(cookie) = jar.get(cookie_name) {
        return Some(cookie.value().to_string());
    }

    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
}

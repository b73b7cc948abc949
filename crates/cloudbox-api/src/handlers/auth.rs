//! Auth handlers: register, login, logout, me, check.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use cookie::time::Duration as CookieDuration;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{AuthCheckResponse, SuccessResponse, UserEnvelope, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, Session, ValidatedJson};
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(CookieJar, Json<UserEnvelope>), ApiError> {
    let session = state
        .session_manager
        .register(&req.username, &req.email, &req.password)
        .await?;

    let jar = jar.add(session_cookie(&state, session.token));
    Ok((
        jar,
        Json(UserEnvelope {
            user: UserResponse::from(&session.user),
        }),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<UserEnvelope>), ApiError> {
    let session = state
        .session_manager
        .login(&req.username, &req.password)
        .await?;

    let jar = jar.add(session_cookie(&state, session.token));
    Ok((
        jar,
        Json(UserEnvelope {
            user: UserResponse::from(&session.user),
        }),
    ))
}

/// POST /api/auth/logout
///
/// Tokens are not revoked; this only clears the cookie.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<SuccessResponse>) {
    let mut removal = Cookie::build((state.config.auth.cookie_name.clone(), ""))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.auth.cookie_secure)
        .path("/")
        .build();
    // Added rather than removed so the expiry is sent even without a cookie.
    removal.make_removal();
    (jar.add(removal), Json(SuccessResponse::ok()))
}

/// GET /api/auth/me
pub async fn me(auth: AuthUser) -> Json<UserEnvelope> {
    Json(UserEnvelope {
        user: UserResponse::from(&auth.user),
    })
}

/// GET /api/auth/check
pub async fn check(Session(session): Session) -> Response {
    match session.user() {
        Some(user) => Json(AuthCheckResponse {
            authenticated: true,
            user: Some(UserResponse::from(user)),
        })
        .into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(AuthCheckResponse {
                authenticated: false,
                user: None,
            }),
        )
            .into_response(),
    }
}

fn session_cookie(state: &AppState, token: String) -> Cookie<'static> {
    let ttl = state.session_manager.session_ttl();
    Cookie::build((state.config.auth.cookie_name.clone(), token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.auth.cookie_secure)
        .path("/")
        .max_age(CookieDuration::seconds(ttl.num_seconds()))
        .build()
}

//! Registration, login and request session resolution.

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info, warn};

use cloudbox_core::config::auth::AuthConfig;
use cloudbox_core::error::{AppError, ErrorKind};
use cloudbox_core::result::AppResult;
use cloudbox_database::repositories::UserRepository;
use cloudbox_entity::user::{CreateUser, User};

use crate::jwt::{JwtDecoder, JwtEncoder};
use crate::password::PasswordHasher;

/// Outcome of resolving a request's session token.
#[derive(Debug, Clone)]
pub enum SessionState {
    /// No token, a bad token, or a token for a user that no longer exists.
    Unauthenticated,
    /// A valid token naming an existing user.
    Authenticated(User),
}

impl SessionState {
    /// The authenticated user, if any.
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Unauthenticated => None,
            Self::Authenticated(user) => Some(user),
        }
    }
}

/// A freshly issued session.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// The account the session belongs to.
    pub user: User,
    /// Signed session token.
    pub token: String,
}

/// Owns the account flows and the token gate.
#[derive(Clone)]
pub struct SessionManager {
    users: Arc<dyn UserRepository>,
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
    hasher: Arc<PasswordHasher>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("encoder", &self.encoder)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Creates a session manager over the given account store.
    pub fn new(config: &AuthConfig, users: Arc<dyn UserRepository>) -> Self {
        Self {
            users,
            encoder: Arc::new(JwtEncoder::new(config)),
            decoder: Arc::new(JwtDecoder::new(config)),
            hasher: Arc::new(PasswordHasher::new()),
        }
    }

    /// Lifetime of issued sessions.
    pub fn session_ttl(&self) -> Duration {
        self.encoder.ttl()
    }

    /// Create an account and open a session for it.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> AppResult<AuthSession> {
        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AppError::validation(
                "Username, email, and password are required",
            ));
        }

        if self
            .users
            .exists_by_username_or_email(username, email)
            .await?
        {
            warn!(username, "Registration rejected: username or email taken");
            return Err(AppError::conflict("Username or email already exists"));
        }

        let password_hash = self.hasher.hash_password(password)?;
        let user = self
            .users
            .create(&CreateUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await
            .map_err(|e| match e.kind {
                // Lost a race with a concurrent registration.
                ErrorKind::Conflict => AppError::conflict("Username or email already exists"),
                _ => e,
            })?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        self.open_session(user)
    }

    /// Verify credentials and open a session.
    ///
    /// `login` is matched against both username and email.
    pub async fn login(&self, login: &str, password: &str) -> AppResult<AuthSession> {
        if login.is_empty() || password.is_empty() {
            return Err(AppError::validation("Username and password are required"));
        }

        let Some(user) = self.users.find_by_login(login).await? else {
            warn!(login, "Login failed: unknown user");
            return Err(AppError::authentication("Invalid credentials"));
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::authentication("Invalid credentials"));
        }

        info!(user_id = %user.id, username = %user.username, "User logged in");
        self.open_session(user)
    }

    /// Resolve a request's session token to a user.
    ///
    /// Every failure mode collapses to [`SessionState::Unauthenticated`];
    /// only storage errors are reported as errors.
    pub async fn resolve(&self, token: Option<&str>) -> AppResult<SessionState> {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Ok(SessionState::Unauthenticated);
        };

        let claims = match self.decoder.decode(token) {
            Ok(claims) => claims,
            Err(e) => {
                debug!(reason = %e.message, "Rejected session token");
                return Ok(SessionState::Unauthenticated);
            }
        };

        match self.users.find_by_id(claims.user_id()).await? {
            Some(user) => Ok(SessionState::Authenticated(user)),
            None => {
                debug!(user_id = %claims.user_id(), "Session token names a missing user");
                Ok(SessionState::Unauthenticated)
            }
        }
    }

    fn open_session(&self, user: User) -> AppResult<AuthSession> {
        let token = self.encoder.issue(user.id, &user.username)?;
        Ok(AuthSession { user, token })
    }
}

//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Placeholder secret shipped in `default.toml`; startup warns when it is still in use.
pub const PLACEHOLDER_JWT_SECRET: &str = "CHANGE_ME_IN_PRODUCTION";

/// Session token and cookie configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Session lifetime in days. Applies to both the token and the cookie.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_days: i64,
    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Whether the session cookie carries the `Secure` attribute.
    #[serde(default)]
    pub cookie_secure: bool,
}

impl AuthConfig {
    /// Whether the signing secret is still the shipped placeholder.
    pub fn uses_placeholder_secret(&self) -> bool {
        self.jwt_secret == PLACEHOLDER_JWT_SECRET
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            session_ttl_days: default_session_ttl(),
            cookie_name: default_cookie_name(),
            cookie_secure: false,
        }
    }
}

fn default_jwt_secret() -> String {
    PLACEHOLDER_JWT_SECRET.to_string()
}

fn default_session_ttl() -> i64 {
    7
}

fn default_cookie_name() -> String {
    "auth_token".to_string()
}

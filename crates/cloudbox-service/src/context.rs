//! Request context carrying the authenticated user.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cloudbox_entity::user::User;

/// Who is acting on the current request.
///
/// Built by the HTTP layer once the session gate has resolved a user and
/// passed into every service call, so each operation is owner-scoped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The authenticated user's name.
    pub username: String,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
        }
    }
}

impl From<&User> for RequestContext {
    fn from(user: &User) -> Self {
        Self::new(user.id, user.username.clone())
    }
}

//! # cloudbox-auth
//!
//! Account registration, login and the session gate for CloudBox.
//!
//! ## Modules
//!
//! - `jwt`: signed session token creation and validation
//! - `password`: Argon2id password hashing
//! - `session`: register/login flows and request session resolution

pub mod jwt;
pub mod password;
pub mod session;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
pub use session::{AuthSession, SessionManager, SessionState};

//! Session lifecycle.

pub mod manager;

pub use manager::{AuthSession, SessionManager, SessionState};

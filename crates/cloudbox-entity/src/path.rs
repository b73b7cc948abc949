//! Materialized path helpers.
//!
//! Paths are slash-joined name sequences with no leading or trailing
//! slash. The empty string denotes the top level.

/// Join a parent path and a child name.
pub fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

/// Replace the final segment of `path` with `name`.
pub fn replace_last_segment(path: &str, name: &str) -> String {
    match path.rsplit_once('/') {
        Some((parent, _)) => join(parent, name),
        None => name.to_string(),
    }
}

/// Normalize a client-supplied location string.
///
/// Surrounding slashes are dropped so `/docs/` and `docs` resolve alike.
pub fn normalize(path: &str) -> &str {
    path.trim_matches('/')
}

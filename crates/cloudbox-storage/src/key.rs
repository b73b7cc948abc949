//! Object key generation.

use uuid::Uuid;

/// Extension used when a file name has none.
const FALLBACK_EXTENSION: &str = "bin";

/// Build a fresh object key `{user_id}/{random}.{ext}`.
///
/// The extension is whatever follows the last `.` of `file_name`. Names
/// without a dot, or ending in one, get [`FALLBACK_EXTENSION`].
pub fn object_key(user_id: Uuid, file_name: &str) -> String {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
        .unwrap_or(FALLBACK_EXTENSION);
    format!("{user_id}/{}.{ext}", Uuid::new_v4())
}

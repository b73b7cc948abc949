//! Object storage configuration.

use serde::{Deserialize, Serialize};

/// Which object store backend holds file bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProviderKind {
    /// S3-compatible service (AWS, MinIO, ...).
    #[default]
    S3,
    /// Directory on the local filesystem.
    Local,
    /// Process-local map. Data is lost on restart.
    Memory,
}

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend to use.
    #[serde(default)]
    pub provider: StorageProviderKind,
    /// Maximum upload size in bytes (default 100 MiB). Exactly this size is accepted.
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// MIME type prefixes accepted on upload.
    #[serde(default = "default_allowed_mime_prefixes")]
    pub allowed_mime_prefixes: Vec<String>,
    /// Upper bound on a single object store call, in seconds.
    #[serde(default = "default_operation_timeout")]
    pub operation_timeout_seconds: u64,
    /// Local filesystem storage configuration.
    #[serde(default)]
    pub local: LocalStorageConfig,
    /// S3-compatible storage configuration.
    #[serde(default)]
    pub s3: S3StorageConfig,
}

impl StorageConfig {
    /// Whether `mime_type` starts with one of the allowed prefixes.
    pub fn is_mime_allowed(&self, mime_type: &str) -> bool {
        self.allowed_mime_prefixes
            .iter()
            .any(|prefix| mime_type.starts_with(prefix.as_str()))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: StorageProviderKind::default(),
            max_upload_size_bytes: default_max_upload(),
            allowed_mime_prefixes: default_allowed_mime_prefixes(),
            operation_timeout_seconds: default_operation_timeout(),
            local: LocalStorageConfig::default(),
            s3: S3StorageConfig::default(),
        }
    }
}

/// Local filesystem storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalStorageConfig {
    /// Root path for local object storage.
    #[serde(default = "default_local_root")]
    pub root_path: String,
}

impl Default for LocalStorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_local_root(),
        }
    }
}

/// S3-compatible object storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3StorageConfig {
    /// S3 endpoint URL (for non-AWS services like MinIO). Empty means AWS.
    #[serde(default)]
    pub endpoint: String,
    /// AWS region.
    #[serde(default = "default_region")]
    pub region: String,
    /// S3 bucket name.
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Access key ID. Empty falls back to the default AWS credential chain.
    #[serde(default)]
    pub access_key: String,
    /// Secret access key.
    #[serde(default)]
    pub secret_key: String,
    /// Use path-style addressing (`endpoint/bucket/key`).
    #[serde(default = "default_true")]
    pub force_path_style: bool,
}

impl Default for S3StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            region: default_region(),
            bucket: default_bucket(),
            access_key: String::new(),
            secret_key: String::new(),
            force_path_style: true,
        }
    }
}

fn default_max_upload() -> u64 {
    104_857_600 // 100 MiB
}

fn default_allowed_mime_prefixes() -> Vec<String> {
    [
        "image/",
        "text/",
        "application/pdf",
        "application/msword",
        "application/vnd.openxmlformats",
        "video/",
        "audio/",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_operation_timeout() -> u64 {
    300
}

fn default_local_root() -> String {
    "./data/objects".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_bucket() -> String {
    "cloudbox".to_string()
}

fn default_true() -> bool {
    true
}

//! Types for the album API and object storage requests and responses.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Firebase Storage REST endpoint used when none is configured
pub const DEFAULT_STORAGE_ENDPOINT: &str = "https://firebasestorage.googleapis.com/v0";

/// Folder that uploaded album images are placed under
pub const DEFAULT_FOLDER: &str = "Gallery";

/// Hard cap on an uploaded image (0.4 MiB)
pub const DEFAULT_MAX_SIZE_BYTES: usize = 419_430;

/// Longest side of an uploaded image, in pixels
pub const DEFAULT_MAX_DIMENSION: u32 = 1024;

/// Configuration for connecting to the album API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API (e.g., "https://example.vercel.app/api")
    pub api_url: String,
    /// Bearer token sent with every request, if the backend needs one
    pub access_token: Option<String>,
    /// Per-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a new config with just the URL.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            access_token: None,
            timeout: None,
        }
    }

    /// Attach a bearer token.
    pub fn with_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }

    /// Set a per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Configuration for the image object storage.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// REST endpoint, without the `/b/{bucket}` part
    pub endpoint: String,
    /// Bucket name
    pub bucket: String,
    /// Folder prefix for new objects
    pub folder: String,
    /// Bearer token for writes and deletes, if the bucket rules need one
    pub access_token: Option<String>,
}

impl StorageConfig {
    /// Create a config for a bucket on the default endpoint.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_STORAGE_ENDPOINT.to_string(),
            bucket: bucket.into(),
            folder: DEFAULT_FOLDER.to_string(),
            access_token: None,
        }
    }

    /// Point at a different endpoint (emulators, tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

/// Limits applied before an image is uploaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionOptions {
    /// Hard cap on the encoded size
    pub max_size_bytes: usize,
    /// Longest side after downscaling
    pub max_dimension: u32,
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            max_size_bytes: DEFAULT_MAX_SIZE_BYTES,
            max_dimension: DEFAULT_MAX_DIMENSION,
        }
    }
}

/// Object metadata returned by the storage write endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredObject {
    pub name: String,
    pub bucket: String,
    pub content_type: Option<String>,
    /// Size as reported by the service (a decimal string)
    pub size: Option<String>,
    /// Comma-separated download tokens; the first one is used in URLs
    pub download_tokens: Option<String>,
}

impl StoredObject {
    /// First download token, if any was issued
    pub fn download_token(&self) -> Option<&str> {
        self.download_tokens
            .as_deref()
            .and_then(|t| t.split(',').next())
            .filter(|t| !t.is_empty())
    }
}

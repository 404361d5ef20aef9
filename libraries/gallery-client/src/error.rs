//! Error types for the gallery clients.

use gallery_core::GalleryError;
use thiserror::Error;

/// Errors that can occur when talking to the album API or object storage.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned a non-2xx response
    #[error("API error: {status} {reason}. {body}")]
    ServerError {
        status: u16,
        reason: String,
        body: String,
    },

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Invalid base or object URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// File not found for upload
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// IO error while reading a local image
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image could not be decoded or re-encoded
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Compression could not get the image under the size cap
    #[error("Image is too large after compression ({size} bytes, limit {limit} bytes)")]
    CompressionTooLarge { size: usize, limit: usize },

    /// Blocking compression task failed to complete
    #[error("Compression task failed: {0}")]
    TaskFailed(String),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    /// Map a transport error, singling out unreachable servers.
    pub(crate) fn from_send(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            ClientError::ServerUnreachable(e.to_string())
        } else {
            ClientError::Request(e)
        }
    }

    /// Map into the core taxonomy for an album API call.
    pub fn into_api_error(self) -> GalleryError {
        match self {
            ClientError::ServerError {
                status,
                reason,
                body,
            } => GalleryError::Api {
                status,
                reason,
                body,
            },
            ClientError::ParseError(msg) => GalleryError::Parse(msg),
            other => GalleryError::Network(other.to_string()),
        }
    }

    /// Map into the core taxonomy for an image upload.
    pub fn into_upload_error(self) -> GalleryError {
        match self {
            ClientError::CompressionTooLarge { size, limit } => {
                GalleryError::CompressionTooLarge { size, limit }
            }
            ClientError::Image(e) => GalleryError::InvalidImage(e.to_string()),
            other => GalleryError::upload(other.to_string()),
        }
    }

    /// Map into the core taxonomy for a storage delete.
    pub fn into_delete_error(self) -> GalleryError {
        GalleryError::storage_delete(self.to_string())
    }
}

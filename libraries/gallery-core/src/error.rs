/// Core error types for Gallery Console
use thiserror::Error;

/// Result type alias using `GalleryError`
pub type Result<T> = std::result::Result<T, GalleryError>;

/// Coarse classification of a [`GalleryError`].
///
/// Components use this to word the notification shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Non-2xx response or transport failure on an album CRUD call
    NetworkOrApi,
    /// Compression or storage write failure while uploading an image
    Upload,
    /// Storage delete failure other than "not found"
    StorageDelete,
    /// Everything else
    Other,
}

/// Core error type for Gallery Console
#[derive(Error, Debug)]
pub enum GalleryError {
    /// The album API answered with a non-2xx status
    #[error("API error: {status} {reason}. {body}")]
    Api {
        status: u16,
        reason: String,
        body: String,
    },

    /// The album API could not be reached
    #[error("Network error: {0}")]
    Network(String),

    /// A successful response could not be parsed
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The image is still over the size cap after compression
    #[error("Image is too large after compression ({size} bytes, limit {limit} bytes)")]
    CompressionTooLarge { size: usize, limit: usize },

    /// The selected file is not a decodable image
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// Writing the object to storage failed
    #[error("Failed to upload image: {0}")]
    Upload(String),

    /// Deleting an object from storage failed
    #[error("Failed to delete image from storage: {0}")]
    StorageDelete(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No authenticated session
    #[error("Not authenticated")]
    NotAuthenticated,

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl GalleryError {
    /// Create an upload error
    pub fn upload(msg: impl Into<String>) -> Self {
        Self::Upload(msg.into())
    }

    /// Create a storage delete error
    pub fn storage_delete(msg: impl Into<String>) -> Self {
        Self::StorageDelete(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Which part of the taxonomy this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Api { .. } | Self::Network(_) | Self::Parse(_) => ErrorKind::NetworkOrApi,
            Self::CompressionTooLarge { .. } | Self::InvalidImage(_) | Self::Upload(_) => {
                ErrorKind::Upload
            }
            Self::StorageDelete(_) => ErrorKind::StorageDelete,
            Self::InvalidInput(_)
            | Self::NotAuthenticated
            | Self::Io(_)
            | Self::Serialization(_) => ErrorKind::Other,
        }
    }
}

/// Core traits for Gallery Console
use crate::error::Result;
use crate::types::{Album, AlbumId, LocalImage, Notification};
use async_trait::async_trait;

/// Remote album collection
///
/// Implemented over HTTP by `gallery-client`; every operation works on the
/// full `Album` shape (no partial updates).
#[async_trait]
pub trait AlbumApi: Send + Sync {
    /// Fetch every album, in backend order
    async fn fetch_albums(&self) -> Result<Vec<Album>>;

    /// Create an album from a draft, returning it with its assigned id
    async fn add_album(&self, draft: &Album) -> Result<Album>;

    /// Replace the album identified by `id` with the draft's fields
    async fn update_album(&self, id: &AlbumId, draft: &Album) -> Result<Album>;

    /// Delete the album identified by `id`
    ///
    /// # Errors
    /// Deleting an id the backend does not know is an error.
    async fn delete_album(&self, id: &AlbumId) -> Result<()>;
}

/// Object storage for album images
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Compress and upload one image, returning its public URL
    async fn upload_image(&self, image: &LocalImage) -> Result<String>;

    /// Delete the object behind a public URL
    ///
    /// An object that is already gone counts as deleted.
    async fn delete_image(&self, url: &str) -> Result<()>;
}

/// Authenticated-session flag
pub trait Session: Send + Sync {
    /// Whether a user is currently logged in
    fn is_authenticated(&self) -> bool;

    /// End the current session
    fn logout(&self) -> Result<()>;
}

/// Sink for transient user notifications (toasts)
pub trait Notifier: Send + Sync {
    /// Show one notification
    fn notify(&self, notification: Notification);
}

//! Gallery Console Core
//!
//! Platform-agnostic types, traits, and error handling for Gallery Console.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Album`, `LocalImage`, `Notification`
//! - **Core Traits**: `AlbumApi`, `ImageStore`, `Session`, `Notifier`
//! - **Error Handling**: Unified `GalleryError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use gallery_core::types::Album;
//!
//! // A fresh draft is dated today and has no images
//! let mut draft = Album::draft();
//! draft.title = "Trip".to_string();
//! draft.album_type = "Travel".to_string();
//!
//! assert!(draft.id.is_none());
//! assert!(draft.img.is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{ErrorKind, GalleryError, Result};
pub use traits::{AlbumApi, ImageStore, Notifier, Session};

pub use types::{Album, AlbumId, LocalImage, Notification, NotificationKind};

mod album;
mod image;
mod notification;

pub use album::{Album, AlbumId, DATE_FORMAT};
pub use image::{content_type_for, LocalImage};
pub use notification::{Notification, NotificationKind};

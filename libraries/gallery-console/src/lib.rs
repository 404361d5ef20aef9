//! Gallery Console state
//!
//! Framework-agnostic state containers for the album admin console. Each
//! component owns its local state; the page keeps the authoritative album
//! collection and re-fetches it after every mutation.
//!
//! - [`GalleryPage`]: session guard, album loading, create flow
//! - [`AlbumList`]: cards, show-all toggles, edit and delete flows
//! - [`AlbumForm`]: draft editing, parallel image upload, submit
//! - [`SessionContext`]: explicit login/logout state
//!
//! Rendering is left to the caller; user-facing messages go through a
//! [`gallery_core::Notifier`].

mod form;
mod list;
mod notify;
mod page;
mod preview;
mod session;

pub use form::{AlbumForm, FormMode, SubmitOutcome};
pub use list::{AlbumCard, AlbumList, DeleteOutcome, OrphanPolicy, DEFAULT_VISIBLE_IMAGES};
pub use notify::NotificationQueue;
pub use page::{GalleryPage, MountOutcome, PageSettings};
pub use preview::{PreviewHandle, PreviewRegistry};
pub use session::SessionContext;

//! Album list: cards, show-all toggles, and the edit and delete flows.

use crate::form::{AlbumForm, SubmitOutcome};
use futures_util::future::join_all;
use gallery_core::{
    Album, AlbumApi, AlbumId, GalleryError, ImageStore, Notification, Notifier, Result,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use tracing::{info, warn};

/// Images shown on a card before "show all" is toggled
pub const DEFAULT_VISIBLE_IMAGES: usize = 3;

/// What happens to stored images that an edit removes from an album.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrphanPolicy {
    /// Leave them in storage
    #[default]
    Keep,
    /// Delete them after the update succeeds
    DeleteRemoved,
}

/// Render model for one album.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumCard<'a> {
    pub id: Option<&'a AlbumId>,
    pub title: &'a str,
    pub album_type: &'a str,
    pub date: &'a str,
    /// Images to draw, in display order
    pub images: &'a [String],
    /// Images behind the "show all" control
    pub hidden: usize,
    pub show_all_control: bool,
    pub expanded: bool,
}

/// Result of a confirmed delete.
#[derive(Debug)]
pub enum DeleteOutcome {
    /// The record is gone; `failed_images` objects could not be removed
    Deleted { failed_images: usize },
    /// The record delete failed
    Failed(GalleryError),
    /// No delete was awaiting confirmation
    NothingPending,
}

struct Editing {
    original: Album,
    form: AlbumForm,
}

/// Album list state. The albums themselves belong to the page.
pub struct AlbumList {
    api: Arc<dyn AlbumApi>,
    images: Arc<dyn ImageStore>,
    notifier: Arc<dyn Notifier>,
    orphan_policy: OrphanPolicy,
    require_fields: bool,
    expanded: HashSet<AlbumId>,
    editing: Option<Editing>,
    pending_delete: Option<Album>,
}

impl AlbumList {
    pub fn new(
        api: Arc<dyn AlbumApi>,
        images: Arc<dyn ImageStore>,
        notifier: Arc<dyn Notifier>,
        orphan_policy: OrphanPolicy,
    ) -> Self {
        Self {
            api,
            images,
            notifier,
            orphan_policy,
            require_fields: false,
            expanded: HashSet::new(),
            editing: None,
            pending_delete: None,
        }
    }

    /// Open edit forms with `AlbumForm::require_fields` set
    pub fn require_fields(mut self, required: bool) -> Self {
        self.require_fields = required;
        self
    }

    pub fn orphan_policy(&self) -> OrphanPolicy {
        self.orphan_policy
    }

    /// Build one card per album.
    pub fn cards<'a>(&self, albums: &'a [Album]) -> Vec<AlbumCard<'a>> {
        albums
            .iter()
            .map(|album| {
                let expandable = album.img.len() > DEFAULT_VISIBLE_IMAGES;
                let expanded = expandable
                    && album
                        .id
                        .as_ref()
                        .is_some_and(|id| self.expanded.contains(id));
                let shown = if expandable && !expanded {
                    DEFAULT_VISIBLE_IMAGES
                } else {
                    album.img.len()
                };

                AlbumCard {
                    id: album.id.as_ref(),
                    title: &album.title,
                    album_type: &album.album_type,
                    date: &album.date_album,
                    images: &album.img[..shown],
                    hidden: album.img.len() - shown,
                    show_all_control: expandable,
                    expanded,
                }
            })
            .collect()
    }

    /// Flip "show all" for an album; returns the new state.
    pub fn toggle_show_all(&mut self, id: &AlbumId) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.clone());
            true
        }
    }

    pub fn is_expanded(&self, id: &AlbumId) -> bool {
        self.expanded.contains(id)
    }

    // ========================================================================
    // Edit
    // ========================================================================

    /// Open the edit form for a saved album.
    pub fn begin_edit(&mut self, album: &Album) -> Result<&AlbumForm> {
        if album.id.is_none() {
            return Err(GalleryError::invalid_input("cannot edit an unsaved album"));
        }

        let form = AlbumForm::for_album(
            album.clone(),
            Arc::clone(&self.images),
            Arc::clone(&self.notifier),
        )
        .require_fields(self.require_fields);
        let editing = self.editing.insert(Editing {
            original: album.clone(),
            form,
        });
        Ok(&editing.form)
    }

    pub fn edit_form(&self) -> Option<&AlbumForm> {
        self.editing.as_ref().map(|e| &e.form)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Submit the open edit form as a full-replace update, then refresh.
    ///
    /// The form closes only when the update succeeds.
    pub async fn submit_edit<R, Fut>(&mut self, refresh: R) -> SubmitOutcome
    where
        R: FnOnce() -> Fut,
        Fut: Future<Output = ()>,
    {
        let Some(editing) = &self.editing else {
            return SubmitOutcome::Rejected(GalleryError::invalid_input("no album is being edited"));
        };
        let Some(id) = editing.original.id.clone() else {
            return SubmitOutcome::Rejected(GalleryError::invalid_input("cannot edit an unsaved album"));
        };

        let api = Arc::clone(&self.api);
        let outcome = editing
            .form
            .submit(|draft| async move { api.update_album(&id, &draft).await.map(|_| ()) })
            .await;

        let removed: Vec<String> = match &outcome {
            SubmitOutcome::Submitted(merged) if self.orphan_policy == OrphanPolicy::DeleteRemoved => {
                editing
                    .original
                    .img
                    .iter()
                    .filter(|url| !merged.img.contains(url))
                    .cloned()
                    .collect()
            }
            _ => Vec::new(),
        };

        match outcome {
            SubmitOutcome::Submitted(_) | SubmitOutcome::Failed(_) => {
                if !removed.is_empty() {
                    let failed = delete_images(self.images.as_ref(), &removed).await;
                    info!(
                        removed = removed.len(),
                        failed, "Removed images deleted from storage"
                    );
                }
                refresh().await;
                if outcome.is_submitted() {
                    self.editing = None;
                }
            }
            SubmitOutcome::Rejected(_) | SubmitOutcome::Ignored => {}
        }

        outcome
    }

    // ========================================================================
    // Delete
    // ========================================================================

    /// Ask for confirmation before deleting an album.
    pub fn request_delete(&mut self, album: &Album) {
        self.pending_delete = Some(album.clone());
    }

    /// The album awaiting confirmation, if any
    pub fn pending_delete(&self) -> Option<&Album> {
        self.pending_delete.as_ref()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the confirmed album: its images first (best effort), then the
    /// record, then refresh. One notification sums up the result.
    ///
    /// `refresh` must not notify on its own; it reports whether the reload
    /// worked so a failure can be folded into that single notification.
    pub async fn confirm_delete<R, Fut>(&mut self, refresh: R) -> DeleteOutcome
    where
        R: FnOnce() -> Fut,
        Fut: Future<Output = bool>,
    {
        let Some(target) = self.pending_delete.clone() else {
            return DeleteOutcome::NothingPending;
        };
        let Some(id) = target.id.clone() else {
            self.pending_delete = None;
            return DeleteOutcome::Failed(GalleryError::invalid_input(
                "cannot delete an unsaved album",
            ));
        };

        let failed_images = delete_images(self.images.as_ref(), &target.img).await;
        let result = self.api.delete_album(&id).await;

        let refreshed = refresh().await;
        self.pending_delete = None;
        if !refreshed {
            warn!(id = %id, "Album list not refreshed after delete");
        }

        match result {
            Ok(()) => {
                self.expanded.remove(&id);
                info!(id = %id, failed_images, "Album and images deleted");
                let mut message = if failed_images == 0 {
                    "Album and all its images deleted successfully".to_string()
                } else {
                    format!(
                        "Album deleted, but {} of {} images could not be removed from storage",
                        failed_images,
                        target.img.len()
                    )
                };
                if !refreshed {
                    message.push_str(". The album list could not be refreshed");
                }
                self.notifier.notify(Notification::success(message));
                DeleteOutcome::Deleted { failed_images }
            }
            Err(e) => {
                warn!(id = %id, error = %e, "Album delete failed");
                self.notifier
                    .notify(Notification::error(format!("Failed to delete album. {}", e)));
                DeleteOutcome::Failed(e)
            }
        }
    }
}

/// Delete every URL concurrently; returns how many failed.
async fn delete_images(store: &dyn ImageStore, urls: &[String]) -> usize {
    let results = join_all(urls.iter().map(|url| store.delete_image(url))).await;

    results
        .iter()
        .zip(urls)
        .filter(|(result, url)| match result {
            Ok(()) => false,
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to delete image from storage");
                true
            }
        })
        .count()
}

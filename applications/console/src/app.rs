//! Console session: the gallery page wired to real clients.

use crate::config::ConsoleConfig;
use crate::error::{ConsoleError, Result};
use gallery_client::{read_local_image, GalleryClient};
use gallery_console::{
    AlbumCard, AlbumForm, DeleteOutcome, GalleryPage, MountOutcome, NotificationQueue,
    SessionContext, SubmitOutcome,
};
use gallery_core::{Album, AlbumId, GalleryError, LocalImage, Notification};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Field changes for `add` and `edit`.
#[derive(Debug, Clone, Default)]
pub struct AlbumChanges {
    pub title: Option<String>,
    pub album_type: Option<String>,
    pub date: Option<String>,
    pub add_images: Vec<PathBuf>,
    /// Indexes into the album's current image list
    pub remove_images: Vec<usize>,
}

pub struct Console {
    page: GalleryPage,
    notifications: Arc<NotificationQueue>,
}

impl Console {
    /// Build the clients and load the albums.
    ///
    /// Fails if the session is not logged in or the albums cannot be loaded.
    pub async fn open(config: &ConsoleConfig) -> Result<Self> {
        config.validate()?;

        let client = GalleryClient::new(config.client_config())?;
        let uploads = client.uploads(config.storage_config(), config.compression())?;
        let session = Arc::new(SessionContext::init(&config.session.path)?);
        let notifications = Arc::new(NotificationQueue::new());

        let mut page = GalleryPage::new(
            Arc::new(client.albums()),
            Arc::new(uploads),
            session,
            notifications.clone(),
            config.page_settings(),
        );

        match page.mount().await {
            MountOutcome::Redirect(route) => {
                debug!(route = %route, "Session not authenticated");
                return Err(ConsoleError::NotLoggedIn);
            }
            MountOutcome::LoadFailed => {
                return Err(ConsoleError::ActionFailed(
                    "could not load albums".to_string(),
                ));
            }
            MountOutcome::Loaded(count) => debug!(count, "Console ready"),
        }

        Ok(Self {
            page,
            notifications,
        })
    }

    /// Notifications raised since the last call, oldest first
    pub fn take_notifications(&self) -> Vec<Notification> {
        self.notifications.drain()
    }

    pub fn albums(&self) -> &[Album] {
        self.page.albums()
    }

    pub fn album(&self, id: &AlbumId) -> Option<&Album> {
        self.page.album(id)
    }

    pub fn cards(&self) -> Vec<AlbumCard<'_>> {
        self.page.cards()
    }

    /// Expand every card that has images behind "show all".
    pub fn expand_all(&mut self) {
        let collapsed: Vec<AlbumId> = self
            .page
            .cards()
            .iter()
            .filter(|card| card.show_all_control && !card.expanded)
            .filter_map(|card| card.id.cloned())
            .collect();

        for id in &collapsed {
            self.page.toggle_show_all(id);
        }
    }

    /// Create an album from `changes` and any images it names.
    pub async fn add(&mut self, changes: AlbumChanges) -> Result<Album> {
        let images = load_images(&changes.add_images).await?;
        apply_changes(self.page.form(), &changes, images)?;
        finish_submit(self.page.submit_new_album().await)
    }

    /// Apply `changes` to an existing album.
    pub async fn edit(&mut self, id: &AlbumId, changes: AlbumChanges) -> Result<Album> {
        let images = load_images(&changes.add_images).await?;
        if self.page.album(id).is_none() {
            return Err(ConsoleError::NotFound(id.to_string()));
        }

        let form = self.page.begin_edit(id)?;
        if let Err(e) = apply_changes(form, &changes, images) {
            self.page.cancel_edit();
            return Err(e);
        }
        finish_submit(self.page.submit_edit().await)
    }

    /// Delete an album and its stored images.
    ///
    /// Returns how many images could not be removed from storage.
    pub async fn delete(&mut self, id: &AlbumId) -> Result<usize> {
        if self.page.request_delete(id).is_err() {
            return Err(ConsoleError::NotFound(id.to_string()));
        }

        match self.page.confirm_delete().await {
            DeleteOutcome::Deleted { failed_images } => Ok(failed_images),
            DeleteOutcome::Failed(e) => Err(e.into()),
            DeleteOutcome::NothingPending => Err(ConsoleError::ActionFailed(
                "no delete was pending".to_string(),
            )),
        }
    }
}

async fn load_images(paths: &[PathBuf]) -> Result<Vec<LocalImage>> {
    let mut images = Vec::with_capacity(paths.len());
    for path in paths {
        images.push(read_local_image(path).await?);
    }
    Ok(images)
}

fn apply_changes(form: &AlbumForm, changes: &AlbumChanges, images: Vec<LocalImage>) -> Result<()> {
    if let Some(title) = &changes.title {
        form.set_title(title.clone());
    }
    if let Some(album_type) = &changes.album_type {
        form.set_album_type(album_type.clone());
    }
    if let Some(date) = &changes.date {
        form.set_date(date.clone());
    }

    // Highest index first so earlier removals don't shift later ones
    let mut indexes = changes.remove_images.clone();
    indexes.sort_unstable_by(|a, b| b.cmp(a));
    indexes.dedup();
    for index in indexes {
        if form.remove_existing_image(index).is_none() {
            return Err(GalleryError::invalid_input(format!("no image at index {}", index)).into());
        }
    }

    if !images.is_empty() {
        form.select_images(images);
    }
    Ok(())
}

fn finish_submit(outcome: SubmitOutcome) -> Result<Album> {
    match outcome {
        SubmitOutcome::Submitted(album) => Ok(album),
        SubmitOutcome::Failed(e) | SubmitOutcome::Rejected(e) => Err(e.into()),
        SubmitOutcome::Ignored => Err(ConsoleError::ActionFailed(
            "a submit is already in progress".to_string(),
        )),
    }
}

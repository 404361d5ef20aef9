//! Gallery page: the top-level orchestrator.

use crate::form::{AlbumForm, SubmitOutcome};
use crate::list::{AlbumCard, AlbumList, DeleteOutcome, OrphanPolicy};
use gallery_core::{
    Album, AlbumApi, AlbumId, GalleryError, ImageStore, Notification, Notifier, Result, Session,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Page-level settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSettings {
    /// Where unauthenticated visitors are sent
    pub login_route: String,
    pub orphan_policy: OrphanPolicy,
    /// Reject blank or malformed drafts before uploading
    pub require_fields: bool,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            login_route: "/login".to_string(),
            orphan_policy: OrphanPolicy::default(),
            require_fields: false,
        }
    }
}

/// What `mount` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountOutcome {
    /// Not logged in; go to this route. Nothing was loaded.
    Redirect(String),
    /// Albums loaded
    Loaded(usize),
    /// Loading failed; the user was notified
    LoadFailed,
}

/// Holds the authoritative album collection and wires the list and the
/// create form to it.
pub struct GalleryPage {
    api: Arc<dyn AlbumApi>,
    session: Arc<dyn Session>,
    notifier: Arc<dyn Notifier>,
    settings: PageSettings,
    albums: Vec<Album>,
    loading: bool,
    list: AlbumList,
    form: AlbumForm,
}

impl GalleryPage {
    pub fn new(
        api: Arc<dyn AlbumApi>,
        images: Arc<dyn ImageStore>,
        session: Arc<dyn Session>,
        notifier: Arc<dyn Notifier>,
        settings: PageSettings,
    ) -> Self {
        let list = AlbumList::new(
            Arc::clone(&api),
            Arc::clone(&images),
            Arc::clone(&notifier),
            settings.orphan_policy,
        )
        .require_fields(settings.require_fields);
        let form =
            AlbumForm::new(images, Arc::clone(&notifier)).require_fields(settings.require_fields);

        Self {
            api,
            session,
            notifier,
            settings,
            albums: Vec::new(),
            loading: true,
            list,
            form,
        }
    }

    /// Check the session, then load the albums.
    pub async fn mount(&mut self) -> MountOutcome {
        if !self.session.is_authenticated() {
            debug!(route = %self.settings.login_route, "Not authenticated, redirecting");
            return MountOutcome::Redirect(self.settings.login_route.clone());
        }

        let loaded = reload(self.api.as_ref(), &mut self.albums, self.notifier.as_ref()).await;
        self.loading = false;

        if loaded {
            MountOutcome::Loaded(self.albums.len())
        } else {
            MountOutcome::LoadFailed
        }
    }

    /// Re-fetch the collection from the backend.
    pub async fn refresh(&mut self) -> bool {
        reload(self.api.as_ref(), &mut self.albums, self.notifier.as_ref()).await
    }

    /// End the session and clear everything loaded under it.
    ///
    /// Returns the route to go to next.
    pub fn logout(&mut self) -> Result<String> {
        self.session.logout()?;
        self.albums.clear();
        self.loading = true;
        self.list.cancel_edit();
        self.list.cancel_delete();
        Ok(self.settings.login_route.clone())
    }

    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    pub fn album(&self, id: &AlbumId) -> Option<&Album> {
        self.albums.iter().find(|a| a.id.as_ref() == Some(id))
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn settings(&self) -> &PageSettings {
        &self.settings
    }

    pub fn cards(&self) -> Vec<AlbumCard<'_>> {
        self.list.cards(&self.albums)
    }

    pub fn toggle_show_all(&mut self, id: &AlbumId) -> bool {
        self.list.toggle_show_all(id)
    }

    pub fn list(&self) -> &AlbumList {
        &self.list
    }

    // ========================================================================
    // Create
    // ========================================================================

    /// The "add album" form
    pub fn form(&self) -> &AlbumForm {
        &self.form
    }

    /// Submit the add form: upload, create, refresh.
    pub async fn submit_new_album(&mut self) -> SubmitOutcome {
        let Self {
            api,
            notifier,
            albums,
            form,
            ..
        } = self;
        let (api, notifier) = (&**api, &**notifier);

        form.submit(|draft| async move {
            let created = api.add_album(&draft).await?;
            info!(id = ?created.id, "Album created");
            reload(api, albums, notifier).await;
            Ok(())
        })
        .await
    }

    // ========================================================================
    // Edit
    // ========================================================================

    /// Open the edit form for an album.
    pub fn begin_edit(&mut self, id: &AlbumId) -> Result<&AlbumForm> {
        let album = self
            .albums
            .iter()
            .find(|a| a.id.as_ref() == Some(id))
            .ok_or_else(|| GalleryError::invalid_input(format!("no album with id {}", id)))?;
        self.list.begin_edit(album)
    }

    pub fn edit_form(&self) -> Option<&AlbumForm> {
        self.list.edit_form()
    }

    pub fn cancel_edit(&mut self) {
        self.list.cancel_edit();
    }

    /// Submit the edit form: upload, update, refresh.
    pub async fn submit_edit(&mut self) -> SubmitOutcome {
        let Self {
            api,
            notifier,
            albums,
            list,
            ..
        } = self;
        let (api, notifier) = (&**api, &**notifier);

        list.submit_edit(move || async move {
            reload(api, albums, notifier).await;
        })
        .await
    }

    // ========================================================================
    // Delete
    // ========================================================================

    /// Stage an album for deletion; returns it for the confirmation prompt.
    pub fn request_delete(&mut self, id: &AlbumId) -> Result<&Album> {
        let album = self
            .albums
            .iter()
            .find(|a| a.id.as_ref() == Some(id))
            .ok_or_else(|| GalleryError::invalid_input(format!("no album with id {}", id)))?;
        self.list.request_delete(album);
        Ok(album)
    }

    pub fn cancel_delete(&mut self) {
        self.list.cancel_delete();
    }

    /// Delete the staged album, its images, then refresh.
    pub async fn confirm_delete(&mut self) -> DeleteOutcome {
        let Self { api, albums, list, .. } = self;
        let api = &**api;

        // The list reports a failed refresh in its own delete notification
        list.confirm_delete(move || fetch_into(api, albums)).await
    }
}

/// Fetch the collection into `albums`. On failure the old list is kept and
/// the user is told.
async fn reload(api: &dyn AlbumApi, albums: &mut Vec<Album>, notifier: &dyn Notifier) -> bool {
    let loaded = fetch_into(api, albums).await;
    if !loaded {
        notifier.notify(Notification::error(
            "Failed to load albums. Please try again later.",
        ));
    }
    loaded
}

/// Fetch the collection into `albums` without notifying anyone.
async fn fetch_into(api: &dyn AlbumApi, albums: &mut Vec<Album>) -> bool {
    match api.fetch_albums().await {
        Ok(fetched) => {
            debug!(count = fetched.len(), "Albums loaded");
            *albums = fetched;
            true
        }
        Err(e) => {
            warn!(error = %e, "Failed to fetch albums");
            false
        }
    }
}

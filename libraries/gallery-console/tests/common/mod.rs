//! Common test fakes and fixtures
#![allow(dead_code)]

use async_trait::async_trait;
use gallery_console::{GalleryPage, NotificationQueue, PageSettings, SessionContext};
use gallery_core::{
    Album, AlbumApi, AlbumId, GalleryError, ImageStore, LocalImage, Result, Session,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// In-memory album backend that records every call.
#[derive(Default)]
pub struct FakeAlbumApi {
    albums: Mutex<Vec<Album>>,
    next_id: Mutex<u32>,
    fail_with: Mutex<Option<(u16, String)>>,
    failing_fetches: Mutex<bool>,
    pub fetches: Mutex<usize>,
    pub added: Mutex<Vec<Album>>,
    pub updated: Mutex<Vec<(AlbumId, Album)>>,
    pub deleted: Mutex<Vec<AlbumId>>,
}

impl FakeAlbumApi {
    pub fn with_albums(albums: Vec<Album>) -> Arc<Self> {
        let api = Self::default();
        *api.albums.lock().unwrap() = albums;
        *api.next_id.lock().unwrap() = 100;
        Arc::new(api)
    }

    /// Make every call fail like the backend answered `status` with `body`
    pub fn fail_with(&self, status: u16, body: &str) {
        *self.fail_with.lock().unwrap() = Some((status, body.to_string()));
    }

    pub fn recover(&self) {
        *self.fail_with.lock().unwrap() = None;
        *self.failing_fetches.lock().unwrap() = false;
    }

    /// Make only `fetch_albums` fail; mutations keep working
    pub fn fail_fetches(&self) {
        *self.failing_fetches.lock().unwrap() = true;
    }

    pub fn stored(&self) -> Vec<Album> {
        self.albums.lock().unwrap().clone()
    }

    pub fn fetch_count(&self) -> usize {
        *self.fetches.lock().unwrap()
    }

    fn check(&self) -> Result<()> {
        match &*self.fail_with.lock().unwrap() {
            Some((status, body)) => Err(GalleryError::Api {
                status: *status,
                reason: "Internal Server Error".to_string(),
                body: body.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AlbumApi for FakeAlbumApi {
    async fn fetch_albums(&self) -> Result<Vec<Album>> {
        *self.fetches.lock().unwrap() += 1;
        self.check()?;
        if *self.failing_fetches.lock().unwrap() {
            return Err(GalleryError::Network("connection reset".to_string()));
        }
        Ok(self.stored())
    }

    async fn add_album(&self, draft: &Album) -> Result<Album> {
        self.check()?;
        self.added.lock().unwrap().push(draft.clone());

        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            AlbumId::new(next.to_string())
        };
        let mut created = draft.clone();
        created.id = Some(id);
        self.albums.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_album(&self, id: &AlbumId, draft: &Album) -> Result<Album> {
        self.check()?;
        self.updated
            .lock()
            .unwrap()
            .push((id.clone(), draft.clone()));

        let mut albums = self.albums.lock().unwrap();
        let slot = albums
            .iter_mut()
            .find(|a| a.id.as_ref() == Some(id))
            .ok_or_else(|| GalleryError::Api {
                status: 404,
                reason: "Not Found".to_string(),
                body: String::new(),
            })?;
        *slot = Album {
            id: Some(id.clone()),
            ..draft.clone()
        };
        Ok(slot.clone())
    }

    async fn delete_album(&self, id: &AlbumId) -> Result<()> {
        self.check()?;
        self.deleted.lock().unwrap().push(id.clone());
        self.albums
            .lock()
            .unwrap()
            .retain(|a| a.id.as_ref() != Some(id));
        Ok(())
    }
}

/// Storage fake: uploads yield `https://store.test/<file>` URLs.
#[derive(Default)]
pub struct FakeImageStore {
    failing_uploads: Mutex<HashSet<String>>,
    failing_deletes: Mutex<HashSet<String>>,
    upload_delays: Mutex<HashMap<String, Duration>>,
    in_flight: Mutex<(usize, usize)>,
    pub uploads: Mutex<Vec<String>>,
    pub deletes: Mutex<Vec<String>>,
}

impl FakeImageStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn url_for(file_name: &str) -> String {
        format!("https://store.test/{}", file_name)
    }

    pub fn fail_upload_of(&self, file_name: &str) {
        self.failing_uploads
            .lock()
            .unwrap()
            .insert(file_name.to_string());
    }

    pub fn fail_delete_of(&self, url: &str) {
        self.failing_deletes.lock().unwrap().insert(url.to_string());
    }

    /// Hold the upload of `file_name` for `delay` before it completes
    pub fn delay_upload_of(&self, file_name: &str, delay: Duration) {
        self.upload_delays
            .lock()
            .unwrap()
            .insert(file_name.to_string(), delay);
    }

    /// Most uploads seen running at the same time
    pub fn peak_in_flight(&self) -> usize {
        self.in_flight.lock().unwrap().1
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    pub fn deleted_urls(&self) -> Vec<String> {
        self.deletes.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageStore for FakeImageStore {
    async fn upload_image(&self, image: &LocalImage) -> Result<String> {
        {
            let mut in_flight = self.in_flight.lock().unwrap();
            in_flight.0 += 1;
            in_flight.1 = in_flight.1.max(in_flight.0);
        }
        let delay = self.upload_delays.lock().unwrap().get(&image.file_name).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.lock().unwrap().0 -= 1;

        self.uploads.lock().unwrap().push(image.file_name.clone());
        if self.failing_uploads.lock().unwrap().contains(&image.file_name) {
            return Err(GalleryError::upload("storage unavailable"));
        }
        Ok(Self::url_for(&image.file_name))
    }

    async fn delete_image(&self, url: &str) -> Result<()> {
        self.deletes.lock().unwrap().push(url.to_string());
        if self.failing_deletes.lock().unwrap().contains(url) {
            return Err(GalleryError::storage_delete("permission denied"));
        }
        Ok(())
    }
}

/// A saved album with images named `<title>-<n>.jpg`
pub fn album(id: &str, title: &str, images: usize) -> Album {
    Album {
        id: Some(AlbumId::new(id)),
        album_type: "Travel".to_string(),
        title: title.to_string(),
        img: (1..=images)
            .map(|n| FakeImageStore::url_for(&format!("{}-{}.jpg", title, n)))
            .collect(),
        date_album: "2024-06-01".to_string(),
    }
}

pub fn local_image(file_name: &str) -> LocalImage {
    LocalImage::new(file_name, vec![0xFF, 0xD8, 0xFF, 0xE0])
}

/// A mounted-ready page over the fakes with a logged-in session
pub struct Harness {
    pub api: Arc<FakeAlbumApi>,
    pub store: Arc<FakeImageStore>,
    pub session: Arc<SessionContext>,
    pub notifications: Arc<NotificationQueue>,
    pub page: GalleryPage,
}

impl Harness {
    pub fn new(albums: Vec<Album>) -> Self {
        Self::with_settings(albums, PageSettings::default())
    }

    pub fn with_settings(albums: Vec<Album>, settings: PageSettings) -> Self {
        let api = FakeAlbumApi::with_albums(albums);
        let store = FakeImageStore::new();
        let session = Arc::new(SessionContext::in_memory());
        session.login().unwrap();
        let notifications = Arc::new(NotificationQueue::new());

        let page = GalleryPage::new(
            api.clone(),
            store.clone(),
            session.clone(),
            notifications.clone(),
            settings,
        );

        Self {
            api,
            store,
            session,
            notifications,
            page,
        }
    }

    /// Descriptions of every notification so far, consuming them
    pub fn messages(&self) -> Vec<String> {
        self.notifications
            .drain()
            .into_iter()
            .map(|n| n.description)
            .collect()
    }

    pub fn logged_out(self) -> Self {
        self.session.logout().unwrap();
        self
    }
}

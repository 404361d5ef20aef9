//! Album collection operations.

use crate::client::error_from_response;
use crate::error::{ClientError, Result};
use async_trait::async_trait;
use gallery_core::{Album, AlbumApi, AlbumId};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

/// Path of the album collection under the API base URL
const COLLECTION: &str = "galleries";

/// Client for the `/galleries` resource.
#[derive(Clone)]
pub struct AlbumClient {
    http: Client,
    collection_url: String,
    access_token: Option<String>,
}

impl AlbumClient {
    pub(crate) fn new(http: Client, base_url: &str, access_token: Option<String>) -> Self {
        Self {
            http,
            collection_url: format!("{}/{}", base_url, COLLECTION),
            access_token,
        }
    }

    /// URL of the collection (`{api_url}/galleries`).
    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    fn item_url(&self, id: &AlbumId) -> String {
        format!(
            "{}/{}",
            self.collection_url,
            urlencoding::encode(id.as_str())
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(error_from_response(response).await)
        }
    }

    async fn parse<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse {}: {}", what, e)))
    }

    /// Fetch every album.
    pub async fn fetch_albums(&self) -> Result<Vec<Album>> {
        debug!(url = %self.collection_url, "Fetching albums");

        let response = self.send(self.http.get(&self.collection_url)).await?;
        let albums: Vec<Album> = Self::parse(response, "album list").await?;

        debug!(count = albums.len(), "Albums fetched");
        Ok(albums)
    }

    /// Create an album. The backend assigns the id.
    pub async fn add_album(&self, draft: &Album) -> Result<Album> {
        debug!(url = %self.collection_url, title = %draft.title, "Adding album");

        let response = self
            .send(self.http.post(&self.collection_url).json(draft))
            .await?;
        let album: Album = Self::parse(response, "created album").await?;

        info!(
            id = ?album.id,
            title = %album.title,
            images = album.img.len(),
            "Album added"
        );
        Ok(album)
    }

    /// Replace an album with the draft's fields.
    pub async fn update_album(&self, id: &AlbumId, draft: &Album) -> Result<Album> {
        let url = self.item_url(id);
        debug!(url = %url, "Updating album");

        let response = self.send(self.http.put(&url).json(draft)).await?;
        let album: Album = Self::parse(response, "updated album").await?;

        info!(id = %id, images = album.img.len(), "Album updated");
        Ok(album)
    }

    /// Delete an album record.
    pub async fn delete_album(&self, id: &AlbumId) -> Result<()> {
        let url = self.item_url(id);
        debug!(url = %url, "Deleting album");

        self.send(self.http.delete(&url)).await?;

        info!(id = %id, "Album deleted");
        Ok(())
    }
}

#[async_trait]
impl AlbumApi for AlbumClient {
    async fn fetch_albums(&self) -> gallery_core::Result<Vec<Album>> {
        AlbumClient::fetch_albums(self)
            .await
            .map_err(ClientError::into_api_error)
    }

    async fn add_album(&self, draft: &Album) -> gallery_core::Result<Album> {
        AlbumClient::add_album(self, draft)
            .await
            .map_err(ClientError::into_api_error)
    }

    async fn update_album(&self, id: &AlbumId, draft: &Album) -> gallery_core::Result<Album> {
        AlbumClient::update_album(self, id, draft)
            .await
            .map_err(ClientError::into_api_error)
    }

    async fn delete_album(&self, id: &AlbumId) -> gallery_core::Result<()> {
        AlbumClient::delete_album(self, id)
            .await
            .map_err(ClientError::into_api_error)
    }
}

//! Main gallery client.

use crate::albums::AlbumClient;
use crate::error::{ClientError, Result};
use crate::storage::StorageClient;
use crate::types::{ClientConfig, CompressionOptions, StorageConfig};
use crate::upload::UploadClient;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;

/// Entry point for the album API and image storage.
///
/// Holds one pooled HTTP client that every sub-client shares.
///
/// # Example
///
/// ```ignore
/// use gallery_client::{ClientConfig, GalleryClient, StorageConfig};
///
/// let client = GalleryClient::new(ClientConfig::new("https://example.vercel.app/api"))?;
/// let albums = client.albums().fetch_albums().await?;
/// println!("Found {} albums", albums.len());
///
/// let uploads = client.uploads(StorageConfig::new("my-bucket"), Default::default())?;
/// let url = uploads.upload_image(&image).await?;
/// ```
#[derive(Clone)]
pub struct GalleryClient {
    http: Client,
    config: ClientConfig,
}

impl GalleryClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let api_url = normalize_url(&config.api_url)?;

        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("GalleryConsole/{}", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ClientError::Request)?;

        debug!(api_url = %api_url, "Gallery client created");

        Ok(Self {
            http,
            config: ClientConfig { api_url, ..config },
        })
    }

    /// Get the normalized API URL.
    pub fn api_url(&self) -> &str {
        &self.config.api_url
    }

    /// Get a client for the album collection.
    pub fn albums(&self) -> AlbumClient {
        AlbumClient::new(
            self.http.clone(),
            &self.config.api_url,
            self.config.access_token.clone(),
        )
    }

    /// Get an upload client for the given bucket.
    pub fn uploads(
        &self,
        storage: StorageConfig,
        limits: CompressionOptions,
    ) -> Result<UploadClient> {
        let endpoint = normalize_url(&storage.endpoint)?;
        if storage.bucket.trim().is_empty() {
            return Err(ClientError::InvalidUrl(
                "storage bucket cannot be empty".into(),
            ));
        }

        let storage = StorageClient::new(
            self.http.clone(),
            StorageConfig {
                endpoint,
                ..storage
            },
        );
        Ok(UploadClient::new(storage, limits))
    }
}

/// Validate a base URL and strip trailing slashes.
fn normalize_url(url: &str) -> Result<String> {
    if url.is_empty() {
        return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
    }

    let url = url.trim_end_matches('/').to_string();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ClientError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }

    Ok(url)
}

/// Turn a non-2xx response into a `ServerError`, keeping the body text.
pub(crate) async fn error_from_response(response: Response) -> ClientError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    ClientError::ServerError {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("").to_string(),
        body,
    }
}

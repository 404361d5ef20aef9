//! Image upload and removal.

use crate::compress::{compress_image, CompressedImage};
use crate::error::{ClientError, Result};
use crate::storage::{object_key_from_url, DeleteStatus, StorageClient};
use crate::types::CompressionOptions;
use async_trait::async_trait;
use chrono::Utc;
use gallery_core::{ImageStore, LocalImage};
use std::path::Path;
use tracing::{debug, info, warn};

/// Upload client: compresses images and stores them in the bucket.
#[derive(Clone)]
pub struct UploadClient {
    storage: StorageClient,
    limits: CompressionOptions,
}

impl UploadClient {
    pub(crate) fn new(storage: StorageClient, limits: CompressionOptions) -> Self {
        Self { storage, limits }
    }

    pub fn storage(&self) -> &StorageClient {
        &self.storage
    }

    pub fn limits(&self) -> CompressionOptions {
        self.limits
    }

    /// Compress and upload one image.
    ///
    /// # Returns
    /// The public URL of the new object. Nothing is uploaded when the image
    /// cannot be brought under the size cap.
    pub async fn upload_image(&self, image: &LocalImage) -> Result<String> {
        let compressed = self.compress(image).await?;
        debug!(
            file = %image.file_name,
            original = image.len(),
            compressed = compressed.data.len(),
            width = compressed.width,
            height = compressed.height,
            "Image compressed"
        );

        let key = self
            .storage
            .object_key(&image.file_name, Utc::now().timestamp_millis());
        let url = self
            .storage
            .put_object(&key, &compressed.content_type, compressed.data)
            .await?;

        info!(file = %image.file_name, key = %key, "Image uploaded");
        Ok(url)
    }

    async fn compress(&self, image: &LocalImage) -> Result<CompressedImage> {
        let data = image.data.clone();
        let content_type = image.content_type.clone();
        let limits = self.limits;

        tokio::task::spawn_blocking(move || compress_image(&data, &content_type, limits))
            .await
            .map_err(|e| ClientError::TaskFailed(e.to_string()))?
    }

    /// Delete the object behind a public URL.
    ///
    /// A missing object resolves to `DeleteStatus::AlreadyAbsent`.
    pub async fn delete_image_from_storage(&self, url: &str) -> Result<DeleteStatus> {
        let key = object_key_from_url(url)?;
        let status = self.storage.delete_object(&key).await?;
        if status == DeleteStatus::AlreadyAbsent {
            warn!(url = %url, "Image was already missing from storage");
        }
        Ok(status)
    }
}

#[async_trait]
impl ImageStore for UploadClient {
    async fn upload_image(&self, image: &LocalImage) -> gallery_core::Result<String> {
        UploadClient::upload_image(self, image)
            .await
            .map_err(ClientError::into_upload_error)
    }

    async fn delete_image(&self, url: &str) -> gallery_core::Result<()> {
        self.delete_image_from_storage(url)
            .await
            .map(|_| ())
            .map_err(ClientError::into_delete_error)
    }
}

/// Read an image file from disk.
pub async fn read_local_image(path: &Path) -> Result<LocalImage> {
    if !path.exists() {
        return Err(ClientError::FileNotFound(path.display().to_string()));
    }

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string();
    let contents = tokio::fs::read(path).await?;

    Ok(LocalImage::new(file_name, contents))
}

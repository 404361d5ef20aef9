//! Gallery Client
//!
//! HTTP clients for the album REST API and the image object storage.
//!
//! # Features
//!
//! - **Albums**: fetch, add, update and delete against `/galleries`
//! - **Upload**: compress images to the size cap and store them in a bucket
//! - **Cleanup**: delete stored images by public URL, tolerating missing objects
//!
//! # Example
//!
//! ```ignore
//! use gallery_client::{ClientConfig, CompressionOptions, GalleryClient, StorageConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GalleryClient::new(ClientConfig::new("https://example.vercel.app/api"))?;
//!
//!     // List albums
//!     let albums = client.albums().fetch_albums().await?;
//!     println!("Found {} albums", albums.len());
//!
//!     // Upload an image
//!     let uploads = client.uploads(StorageConfig::new("demo.appspot.com"), CompressionOptions::default())?;
//!     let image = gallery_client::read_local_image("beach.jpg".as_ref()).await?;
//!     let url = uploads.upload_image(&image).await?;
//!     println!("Stored at {}", url);
//!
//!     Ok(())
//! }
//! ```

mod albums;
mod client;
mod compress;
mod error;
mod storage;
mod types;
mod upload;

// Re-export main types
pub use albums::AlbumClient;
pub use client::GalleryClient;
pub use compress::{compress_image, CompressedImage};
pub use error::{ClientError, Result};
pub use storage::{object_key_from_url, DeleteStatus, StorageClient};
pub use types::{
    ClientConfig, CompressionOptions, StorageConfig, StoredObject, DEFAULT_FOLDER,
    DEFAULT_MAX_DIMENSION, DEFAULT_MAX_SIZE_BYTES, DEFAULT_STORAGE_ENDPOINT,
};
pub use upload::{read_local_image, UploadClient};

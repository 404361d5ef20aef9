//! Tests for image upload and storage cleanup against a mock bucket.

use gallery_client::{
    ClientConfig, ClientError, CompressionOptions, DeleteStatus, GalleryClient, StorageConfig,
    UploadClient,
};
use gallery_core::{ErrorKind, GalleryError, ImageStore, LocalImage};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BUCKET: &str = "test-bucket";

fn png_image(file_name: &str, width: u32, height: u32) -> LocalImage {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    LocalImage::new(file_name, out.into_inner())
}

fn uploads_for(server: &MockServer, limits: CompressionOptions) -> UploadClient {
    let client = GalleryClient::new(ClientConfig::new(server.uri())).unwrap();
    client
        .uploads(StorageConfig::new(BUCKET).with_endpoint(server.uri()), limits)
        .unwrap()
}

fn stored_object(name: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "bucket": BUCKET,
        "contentType": "image/png",
        "size": "1234",
        "downloadTokens": "tok-1"
    })
}

// =============================================================================
// Upload Tests
// =============================================================================

mod upload {
    use super::*;

    #[tokio::test]
    async fn test_upload_returns_public_url() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/b/test-bucket/o"))
            .and(header("content-type", "image/png"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(stored_object("Gallery/123-beach.png")),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let uploads = uploads_for(&mock_server, CompressionOptions::default());
        let url = uploads
            .upload_image(&png_image("beach.png", 32, 32))
            .await
            .unwrap();

        assert_eq!(
            url,
            format!(
                "{}/b/test-bucket/o/Gallery%2F123-beach.png?alt=media&token=tok-1",
                mock_server.uri()
            )
        );

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];

        let name = request
            .url
            .query_pairs()
            .find(|(k, _)| k == "name")
            .map(|(_, v)| v.into_owned())
            .unwrap();
        assert!(name.starts_with("Gallery/"));
        assert!(name.ends_with("-beach.png"));
    }

    #[tokio::test]
    async fn test_oversized_dimensions_are_recompressed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/b/test-bucket/o"))
            .and(header("content-type", "image/jpeg"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(stored_object("Gallery/1-wide.png")),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let uploads = uploads_for(&mock_server, CompressionOptions::default());
        uploads
            .upload_image(&png_image("wide.png", 1600, 400))
            .await
            .unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        let uploaded = image::load_from_memory(&requests[0].body).unwrap();
        assert_eq!(uploaded.width(), 1024);
        assert_eq!(uploaded.height(), 256);
    }

    #[tokio::test]
    async fn test_too_large_is_never_uploaded() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/b/test-bucket/o"))
            .respond_with(ResponseTemplate::new(200).set_body_json(stored_object("x")))
            .expect(0)
            .mount(&mock_server)
            .await;

        let limits = CompressionOptions {
            max_size_bytes: 100,
            max_dimension: 1024,
        };
        let uploads = uploads_for(&mock_server, limits);
        let image = png_image("huge.png", 200, 200);

        let err = uploads.upload_image(&image).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::CompressionTooLarge { limit: 100, .. }
        ));

        let store: &dyn ImageStore = &uploads;
        let err = store.upload_image(&image).await.unwrap_err();
        assert!(matches!(err, GalleryError::CompressionTooLarge { .. }));
        assert_eq!(err.kind(), ErrorKind::Upload);
    }

    #[tokio::test]
    async fn test_storage_write_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/b/test-bucket/o"))
            .respond_with(ResponseTemplate::new(403).set_body_string("Permission denied"))
            .mount(&mock_server)
            .await;

        let uploads = uploads_for(&mock_server, CompressionOptions::default());
        let store: &dyn ImageStore = &uploads;
        let err = store
            .upload_image(&png_image("a.png", 8, 8))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Upload);
        assert!(err.to_string().contains("Permission denied"));
    }

    #[tokio::test]
    async fn test_undecodable_file() {
        let mock_server = MockServer::start().await;
        let uploads = uploads_for(&mock_server, CompressionOptions::default());
        let store: &dyn ImageStore = &uploads;

        let err = store
            .upload_image(&LocalImage::new("notes.jpg", b"plain text".to_vec()))
            .await
            .unwrap_err();

        assert!(matches!(err, GalleryError::InvalidImage(_)));
    }
}

// =============================================================================
// Delete Tests
// =============================================================================

mod delete {
    use super::*;

    fn object_url(server: &MockServer, key: &str) -> String {
        format!(
            "{}/b/test-bucket/o/{}?alt=media&token=abc",
            server.uri(),
            key
        )
    }

    #[tokio::test]
    async fn test_delete_existing_object() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/b/test-bucket/o/Gallery%2F1-a.jpg"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let uploads = uploads_for(&mock_server, CompressionOptions::default());
        let status = uploads
            .delete_image_from_storage(&object_url(&mock_server, "Gallery%2F1-a.jpg"))
            .await
            .unwrap();

        assert_eq!(status, DeleteStatus::Deleted);
    }

    #[tokio::test]
    async fn test_delete_absent_object_succeeds() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/b/test-bucket/o/Gallery%2F2-gone.jpg"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .expect(2)
            .mount(&mock_server)
            .await;

        let uploads = uploads_for(&mock_server, CompressionOptions::default());
        let url = object_url(&mock_server, "Gallery%2F2-gone.jpg");

        let status = uploads.delete_image_from_storage(&url).await.unwrap();
        assert_eq!(status, DeleteStatus::AlreadyAbsent);

        let store: &dyn ImageStore = &uploads;
        assert!(store.delete_image(&url).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_failure_propagates() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/b/test-bucket/o/Gallery%2F3-b.jpg"))
            .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
            .mount(&mock_server)
            .await;

        let uploads = uploads_for(&mock_server, CompressionOptions::default());
        let store: &dyn ImageStore = &uploads;
        let err = store
            .delete_image(&object_url(&mock_server, "Gallery%2F3-b.jpg"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::StorageDelete);
        assert!(err.to_string().contains("backend exploded"));
    }

    #[tokio::test]
    async fn test_delete_foreign_url_sends_nothing() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&mock_server)
            .await;

        let uploads = uploads_for(&mock_server, CompressionOptions::default());
        let err = uploads
            .delete_image_from_storage("https://cdn.example.com/pictures/a.jpg")
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }
}

//! Common test utilities and fixtures
#![allow(dead_code)]

use gallery_cli::config::{ApiSettings, SessionSettings, StorageSettings};
use gallery_cli::ConsoleConfig;
use gallery_console::SessionContext;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::MockServer;

pub const BUCKET: &str = "test-bucket";

/// Config pointing both the API and storage at one mock server
pub fn config_for(server: &MockServer, dir: &TempDir) -> ConsoleConfig {
    ConsoleConfig {
        api: ApiSettings {
            url: format!("{}/api", server.uri()),
            ..ApiSettings::default()
        },
        storage: StorageSettings {
            endpoint: server.uri(),
            bucket: BUCKET.to_string(),
            ..StorageSettings::default()
        },
        session: SessionSettings {
            path: dir.path().join("session.json"),
            password_hash: None,
        },
        ..ConsoleConfig::default()
    }
}

/// Same as [`config_for`] with a logged-in session on disk
pub fn logged_in_config(server: &MockServer, dir: &TempDir) -> ConsoleConfig {
    let config = config_for(server, dir);
    SessionContext::init(&config.session.path)
        .unwrap()
        .login()
        .unwrap();
    config
}

pub fn album_json(id: &str, title: &str, images: &[String]) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "type": "Travel",
        "title": title,
        "img": images,
        "dateAlbume": "2024-06-01"
    })
}

/// Public URL of an object in the mock bucket
pub fn object_url(server: &MockServer, encoded_key: &str) -> String {
    format!(
        "{}/b/{}/o/{}?alt=media&token=t",
        server.uri(),
        BUCKET,
        encoded_key
    )
}

/// Write a small PNG to `dir` and return its path
pub fn write_png(dir: &Path, file_name: &str) -> PathBuf {
    let img = RgbImage::from_fn(16, 16, |x, y| Rgb([x as u8 * 16, y as u8 * 16, 64]));
    let path = dir.join(file_name);
    DynamicImage::ImageRgb8(img)
        .save_with_format(&path, ImageFormat::Png)
        .unwrap();
    path
}

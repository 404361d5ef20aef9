/// Console configuration
use crate::error::{ConsoleError, Result};
use gallery_client::{
    ClientConfig, CompressionOptions, StorageConfig, DEFAULT_FOLDER, DEFAULT_MAX_DIMENSION,
    DEFAULT_MAX_SIZE_BYTES, DEFAULT_STORAGE_ENDPOINT,
};
use gallery_console::{OrphanPolicy, PageSettings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file read when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "gallery.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_upload")]
    pub upload: UploadSettings,

    #[serde(default = "default_session")]
    pub session: SessionSettings,

    #[serde(default = "default_gallery")]
    pub gallery: GallerySettings,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiSettings {
    /// Base URL; albums live under `{url}/galleries`
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub access_token: Option<String>,

    /// Unset means requests never time out
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default)]
    pub bucket: String,

    #[serde(default = "default_folder")]
    pub folder: String,

    #[serde(default)]
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadSettings {
    #[serde(default = "default_max_size_bytes")]
    pub max_size_bytes: usize,

    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionSettings {
    #[serde(default = "default_session_path")]
    pub path: PathBuf,

    /// bcrypt hash checked by `login`
    #[serde(default)]
    pub password_hash: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GallerySettings {
    #[serde(default = "default_login_route")]
    pub login_route: String,

    #[serde(default)]
    pub orphan_policy: OrphanPolicy,

    /// Refuse drafts with a blank title or type, or a malformed date
    #[serde(default)]
    pub require_fields: bool,
}

impl ConsoleConfig {
    /// Load configuration from a file and the environment.
    ///
    /// `path` defaults to `gallery.toml` in the working directory; a missing
    /// default file is fine, a missing explicit one is not. Environment
    /// variables override the file, e.g. `GALLERY__API__URL` or
    /// `GALLERY__STORAGE__BUCKET`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConsoleError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("GALLERY")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api.url.trim().is_empty() {
            return Err(ConsoleError::Config(
                "API URL is required (set GALLERY__API__URL)".to_string(),
            ));
        }

        if self.storage.bucket.trim().is_empty() {
            return Err(ConsoleError::Config(
                "storage bucket is required (set GALLERY__STORAGE__BUCKET)".to_string(),
            ));
        }

        if self.upload.max_size_bytes == 0 || self.upload.max_dimension == 0 {
            return Err(ConsoleError::Config(
                "upload limits must be greater than zero".to_string(),
            ));
        }

        if self.api.timeout_secs == Some(0) {
            return Err(ConsoleError::Config(
                "api.timeout_secs must be greater than zero; leave it unset for no timeout"
                    .to_string(),
            ));
        }

        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        let mut client = ClientConfig::new(self.api.url.clone());
        if let Some(token) = &self.api.access_token {
            client = client.with_token(token.clone());
        }
        if let Some(secs) = self.api.timeout_secs {
            client = client.with_timeout(Duration::from_secs(secs));
        }
        client
    }

    pub fn storage_config(&self) -> StorageConfig {
        StorageConfig {
            endpoint: self.storage.endpoint.clone(),
            bucket: self.storage.bucket.clone(),
            folder: self.storage.folder.clone(),
            access_token: self.storage.access_token.clone(),
        }
    }

    pub fn compression(&self) -> CompressionOptions {
        CompressionOptions {
            max_size_bytes: self.upload.max_size_bytes,
            max_dimension: self.upload.max_dimension,
        }
    }

    pub fn page_settings(&self) -> PageSettings {
        PageSettings {
            login_route: self.gallery.login_route.clone(),
            orphan_policy: self.gallery.orphan_policy,
            require_fields: self.gallery.require_fields,
        }
    }
}

// Default values
fn default_storage() -> StorageSettings {
    StorageSettings {
        endpoint: default_endpoint(),
        bucket: String::new(),
        folder: default_folder(),
        access_token: None,
    }
}

fn default_endpoint() -> String {
    DEFAULT_STORAGE_ENDPOINT.to_string()
}

fn default_folder() -> String {
    DEFAULT_FOLDER.to_string()
}

fn default_upload() -> UploadSettings {
    UploadSettings {
        max_size_bytes: default_max_size_bytes(),
        max_dimension: default_max_dimension(),
    }
}

fn default_max_size_bytes() -> usize {
    DEFAULT_MAX_SIZE_BYTES
}

fn default_max_dimension() -> u32 {
    DEFAULT_MAX_DIMENSION
}

fn default_session() -> SessionSettings {
    SessionSettings {
        path: default_session_path(),
        password_hash: None,
    }
}

fn default_session_path() -> PathBuf {
    PathBuf::from("./data/session.json")
}

fn default_gallery() -> GallerySettings {
    GallerySettings {
        login_route: default_login_route(),
        orphan_policy: OrphanPolicy::default(),
        require_fields: false,
    }
}

fn default_login_route() -> String {
    "/login".to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        default_storage()
    }
}

impl Default for UploadSettings {
    fn default() -> Self {
        default_upload()
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        default_session()
    }
}

impl Default for GallerySettings {
    fn default() -> Self {
        default_gallery()
    }
}

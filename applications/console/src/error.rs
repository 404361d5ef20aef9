/// Console error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConsoleError>;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Not logged in. Run `gallery-console login` first")]
    NotLoggedIn,

    #[error("Album not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    ActionFailed(String),

    #[error("Gallery error: {0}")]
    Gallery(#[from] gallery_core::GalleryError),

    #[error("Client error: {0}")]
    Client(#[from] gallery_client::ClientError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

impl From<config::ConfigError> for ConsoleError {
    fn from(err: config::ConfigError) -> Self {
        ConsoleError::Config(err.to_string())
    }
}

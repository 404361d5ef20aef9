//! Gallery Console CLI
//!
//! Command-line front end for the album admin console: configuration,
//! password login, and the list/add/edit/delete commands.
//!
//! This library exposes the pieces `main` wires together so they can be tested.

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod render;

pub use app::{AlbumChanges, Console};
pub use auth::Authenticator;
pub use config::ConsoleConfig;
pub use error::{ConsoleError, Result};

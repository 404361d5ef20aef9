//! Album types

use crate::error::{GalleryError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Date format used by `Album::date_album` (`YYYY-MM-DD`)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Album identifier, assigned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlbumId(String);

impl AlbumId {
    /// Create a new album ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AlbumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AlbumId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A photo album
///
/// An album without an `id` is an unsaved draft. `img` is in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AlbumId>,
    #[serde(rename = "type")]
    pub album_type: String,
    pub title: String,
    #[serde(default)]
    pub img: Vec<String>,
    #[serde(rename = "dateAlbume")]
    pub date_album: String,
}

impl Album {
    /// An empty draft dated today (UTC)
    pub fn draft() -> Self {
        Self {
            id: None,
            album_type: String::new(),
            title: String::new(),
            img: Vec::new(),
            date_album: Utc::now().date_naive().format(DATE_FORMAT).to_string(),
        }
    }

    /// Whether the backend has assigned an id yet
    pub fn is_draft(&self) -> bool {
        self.id.is_none()
    }

    /// Check the fields a strict form requires before submitting.
    ///
    /// The date may be a plain `YYYY-MM-DD` date or an ISO-8601 datetime, as
    /// the backend sometimes stores full timestamps.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(GalleryError::invalid_input("title is required"));
        }
        if self.album_type.trim().is_empty() {
            return Err(GalleryError::invalid_input("type is required"));
        }
        if !is_iso_date(&self.date_album) {
            return Err(GalleryError::invalid_input(format!(
                "date must be an ISO-8601 date, got '{}'",
                self.date_album
            )));
        }
        Ok(())
    }
}

fn is_iso_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, DATE_FORMAT).is_ok()
        || DateTime::parse_from_rfc3339(value).is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
}

impl Default for Album {
    fn default() -> Self {
        Self::draft()
    }
}

//! Object storage over the Firebase Storage REST interface.
//!
//! Objects are addressed by a key such as `Gallery/1718000000000-beach.jpg`.
//! Public URLs embed the percent-encoded key after `/o/`, which is how a URL
//! is mapped back to its object for deletion.

use crate::client::error_from_response;
use crate::error::{ClientError, Result};
use crate::types::{StorageConfig, StoredObject};
use bytes::Bytes;
use reqwest::{Client, RequestBuilder, StatusCode};
use tracing::{debug, info};
use url::Url;

/// Outcome of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteStatus {
    Deleted,
    /// The object did not exist; nothing to do
    AlreadyAbsent,
}

/// Client for one storage bucket.
#[derive(Clone)]
pub struct StorageClient {
    http: Client,
    config: StorageConfig,
}

impl StorageClient {
    pub(crate) fn new(http: Client, config: StorageConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    fn bucket_url(&self) -> String {
        format!("{}/b/{}/o", self.config.endpoint, self.config.bucket)
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/{}", self.bucket_url(), urlencoding::encode(key))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Key for a new upload: `{folder}/{unix_millis}-{file_name}`.
    ///
    /// Only the last path component of `file_name` is kept.
    pub fn object_key(&self, file_name: &str, unix_millis: i64) -> String {
        let name = file_name
            .rsplit(['/', '\\'])
            .next()
            .filter(|n| !n.is_empty())
            .unwrap_or("image");
        let folder = self.config.folder.trim_matches('/');
        if folder.is_empty() {
            format!("{}-{}", unix_millis, name)
        } else {
            format!("{}/{}-{}", folder, unix_millis, name)
        }
    }

    /// Public download URL for an object.
    pub fn public_url(&self, key: &str, token: Option<&str>) -> String {
        match token {
            Some(token) => format!(
                "{}?alt=media&token={}",
                self.object_url(key),
                urlencoding::encode(token)
            ),
            None => format!("{}?alt=media", self.object_url(key)),
        }
    }

    /// Write an object and return its public URL.
    pub async fn put_object(&self, key: &str, content_type: &str, data: Bytes) -> Result<String> {
        let url = self.bucket_url();
        let size = data.len();
        debug!(url = %url, key = %key, size, "Writing object");

        let request = self
            .http
            .post(&url)
            .query(&[("name", key)])
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(data);

        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let object: StoredObject = response.json().await.map_err(|e| {
            ClientError::ParseError(format!("Failed to parse storage response: {}", e))
        })?;

        info!(key = %object.name, size, "Object stored");
        Ok(self.public_url(&object.name, object.download_token()))
    }

    /// Delete an object by key. A missing object is not an error.
    pub async fn delete_object(&self, key: &str) -> Result<DeleteStatus> {
        let url = self.object_url(key);
        debug!(url = %url, "Deleting object");

        let response = self
            .authorize(self.http.delete(&url))
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let status = response.status();
        if status.is_success() {
            info!(key = %key, "Object deleted");
            Ok(DeleteStatus::Deleted)
        } else if status == StatusCode::NOT_FOUND {
            debug!(key = %key, "Object already absent");
            Ok(DeleteStatus::AlreadyAbsent)
        } else {
            Err(error_from_response(response).await)
        }
    }
}

/// Recover the object key from a public URL.
///
/// Takes the path segment after the last `/o/` and percent-decodes it.
pub fn object_key_from_url(public_url: &str) -> Result<String> {
    let parsed = Url::parse(public_url)
        .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", public_url, e)))?;

    let path = parsed.path();
    let encoded = path
        .rfind("/o/")
        .map(|i| &path[i + 3..])
        .filter(|rest| !rest.is_empty())
        .ok_or_else(|| {
            ClientError::InvalidUrl(format!("no storage object path in {}", public_url))
        })?;

    let key = urlencoding::decode(encoded)
        .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", public_url, e)))?;
    Ok(key.into_owned())
}

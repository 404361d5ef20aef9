//! Locally selected image files

use bytes::Bytes;
use std::fmt;
use std::path::Path;

/// An image picked by the user, not yet uploaded
///
/// Cloning is cheap; the contents are reference counted.
#[derive(Clone, PartialEq, Eq)]
pub struct LocalImage {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl LocalImage {
    /// Create an image, guessing the content type from the file name
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(Path::new(&file_name)).to_string();
        Self {
            file_name,
            content_type,
            data: data.into(),
        }
    }

    /// Size of the file in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Debug for LocalImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalImage")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Get MIME type for an image file.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_types() {
        assert_eq!(content_type_for(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("a.JPEG")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("a.png")), "image/png");
        assert_eq!(content_type_for(Path::new("a.webp")), "image/webp");
        assert_eq!(
            content_type_for(Path::new("a.heic")),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_new_guesses_content_type() {
        let image = LocalImage::new("beach.png", vec![1u8, 2, 3]);
        assert_eq!(image.content_type, "image/png");
        assert_eq!(image.len(), 3);
    }
}

//! Image compression before upload.

use crate::error::{ClientError, Result};
use crate::types::CompressionOptions;
use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

/// JPEG qualities tried in order until one fits under the cap
const QUALITY_STEPS: [u8; 6] = [90, 80, 70, 60, 50, 40];

/// An image ready for upload.
#[derive(Debug, Clone)]
pub struct CompressedImage {
    pub data: Bytes,
    pub content_type: String,
    pub width: u32,
    pub height: u32,
    /// JPEG quality used, `None` if the original bytes were kept
    pub quality: Option<u8>,
}

/// Shrink an image to fit `options`.
///
/// Images already under both limits are passed through untouched. Anything
/// else is downscaled to `max_dimension` and re-encoded as JPEG at falling
/// quality until it fits under `max_size_bytes`.
///
/// # Errors
/// `Image` if the bytes cannot be decoded, `CompressionTooLarge` if even the
/// lowest quality is over the cap.
pub fn compress_image(
    data: &[u8],
    content_type: &str,
    options: CompressionOptions,
) -> Result<CompressedImage> {
    let img = image::load_from_memory(data)?;
    let (width, height) = img.dimensions();

    let within_dimension = width.max(height) <= options.max_dimension;
    if data.len() <= options.max_size_bytes && within_dimension {
        return Ok(CompressedImage {
            data: Bytes::copy_from_slice(data),
            content_type: content_type.to_string(),
            width,
            height,
            quality: None,
        });
    }

    let img = if within_dimension {
        img
    } else {
        img.resize(
            options.max_dimension,
            options.max_dimension,
            FilterType::Triangle,
        )
    };
    let (width, height) = img.dimensions();

    let mut smallest = usize::MAX;
    for quality in QUALITY_STEPS {
        let encoded = encode_jpeg(&img, quality)?;
        if encoded.len() <= options.max_size_bytes {
            return Ok(CompressedImage {
                data: Bytes::from(encoded),
                content_type: "image/jpeg".to_string(),
                width,
                height,
                quality: Some(quality),
            });
        }
        smallest = smallest.min(encoded.len());
    }

    Err(ClientError::CompressionTooLarge {
        size: smallest,
        limit: options.max_size_bytes,
    })
}

fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let rgb = img.to_rgb8();
    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, quality).encode_image(&rgb)?;
    Ok(buffer)
}

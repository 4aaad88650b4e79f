//! Pure image encoding — functional core.
//!
//! Turns a captured frame into the transport payload. No infrastructure
//! dependencies: pixels in, JPEG bytes out.

use base64::{engine::general_purpose::STANDARD, Engine};
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;

/// JPEG compression quality (0–100). Fixed — not user-tunable.
pub const JPEG_QUALITY: u8 = 85;

/// Transport-ready encoded screenshot. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedAttachment {
    media_type: &'static str,
    data: Vec<u8>,
}

impl EncodedAttachment {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            media_type: "image/jpeg",
            data,
        }
    }

    pub fn media_type(&self) -> &str {
        self.media_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Base64 `data:` URL for embedding in a request body.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, STANDARD.encode(&self.data))
    }
}

/// Encodes a frame as a JPEG attachment.
///
/// Any non-opaque pixel layout is flattened to RGB8 first — JPEG has no
/// alpha channel, so transparency is discarded by intent.
///
/// Deterministic for a given frame (modulo lossy compression artifacts).
pub fn encode(image: &DynamicImage) -> Result<EncodedAttachment, EncodingError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(EncodingError::ZeroDimension);
    }

    let start = std::time::Instant::now();
    let rgb = image.to_rgb8();

    let mut jpeg_bytes: Vec<u8> = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg_bytes, JPEG_QUALITY)
        .encode_image(&rgb)
        .map_err(|e| EncodingError::EncodingFailed(e.to_string()))?;

    log::info!(
        "[CODEC] JPEG encoded {}x{} in {}ms — {} bytes",
        image.width(),
        image.height(),
        start.elapsed().as_millis(),
        jpeg_bytes.len()
    );

    Ok(EncodedAttachment::new(jpeg_bytes))
}

#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("Image has zero width or height")]
    ZeroDimension,

    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

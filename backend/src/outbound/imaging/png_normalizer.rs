//! Normaliser that decodes base64 uploads and re-encodes them as PNG.
//!
//! Clients send JPEG, PNG or WebP captures, with or without a
//! `data:image/...;base64,` prefix. The detector only ever sees PNG.

use std::io::Cursor;

use async_trait::async_trait;
use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use image::ImageFormat;
use tracing::debug;

use crate::domain::ports::{ImageDecodeError, ImageNormalizer};
use crate::domain::{EncodedImage, NormalizedImage, TraceId};

/// Standard alphabet, tolerant of missing `=` padding.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// [`ImageNormalizer`] backed by the `image` crate.
///
/// Decoding runs on the blocking pool; a multi-megabyte photo takes long
/// enough to stall an async worker otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngImageNormalizer;

impl PngImageNormalizer {
    /// Construct the normaliser.
    pub fn new() -> Self {
        Self
    }
}

/// Strip an optional data URI header, returning the base64 body.
fn base64_body(payload: &str) -> &str {
    let trimmed = payload.trim();
    trimmed
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(','))
        .filter(|(header, _)| header.ends_with(";base64"))
        .map_or(trimmed, |(_, body)| body)
}

fn transcode_to_png(payload: &str) -> Result<Vec<u8>, ImageDecodeError> {
    let body: String = base64_body(payload)
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = LENIENT_BASE64
        .decode(body)
        .map_err(|err| ImageDecodeError::invalid_base64(err.to_string()))?;
    let decoded = image::load_from_memory(&bytes)
        .map_err(|err| ImageDecodeError::unsupported_image(err.to_string()))?;

    let mut png = Cursor::new(Vec::new());
    decoded
        .write_to(&mut png, ImageFormat::Png)
        .map_err(|err| ImageDecodeError::encode(err.to_string()))?;
    debug!(
        width = decoded.width(),
        height = decoded.height(),
        "image normalised to png"
    );
    Ok(png.into_inner())
}

#[async_trait]
impl ImageNormalizer for PngImageNormalizer {
    async fn normalize(&self, image: &EncodedImage) -> Result<NormalizedImage, ImageDecodeError> {
        let payload = image.as_str().to_owned();
        let png = TraceId::spawn_blocking(move || transcode_to_png(&payload))
            .await
            .map_err(|err| ImageDecodeError::worker(err.to_string()))??;
        Ok(NormalizedImage::from_png_bytes(png))
    }
}

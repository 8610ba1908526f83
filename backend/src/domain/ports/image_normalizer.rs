//! Driven port turning client image payloads into detector input.

use async_trait::async_trait;

use crate::domain::{EncodedImage, NormalizedImage};

use super::define_port_error;

define_port_error! {
    /// Reasons an image payload could not be normalised.
    ///
    /// All variants are caller-fixable except `Worker`.
    pub enum ImageDecodeError {
        /// The payload is not valid base64.
        InvalidBase64 { message: String } => "image is not valid base64: {message}",
        /// The decoded bytes are not an image in a supported format.
        UnsupportedImage { message: String } => "image could not be decoded: {message}",
        /// Re-encoding the decoded image failed.
        Encode { message: String } => "image could not be re-encoded: {message}",
        /// The blocking worker running the transcode failed.
        Worker { message: String } => "image worker failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageNormalizer: Send + Sync {
    /// Decode `image` and re-encode it in the detector's input format.
    async fn normalize(&self, image: &EncodedImage) -> Result<NormalizedImage, ImageDecodeError>;
}

//! Driving port for running disease detection on an image.

use async_trait::async_trait;

use crate::domain::{EncodedImage, Error, Prediction};

/// Domain use-case port for predictions. Stateless; never touches storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PredictionQuery: Send + Sync {
    /// Normalise the image and run the detector on it.
    ///
    /// # Errors
    /// - [`ErrorCode::InvalidImage`](crate::domain::ErrorCode::InvalidImage)
    ///   when the payload is not a decodable image; the detector is not run.
    /// - [`ErrorCode::Timeout`](crate::domain::ErrorCode::Timeout) when the
    ///   detector misses its deadline.
    /// - Internal errors for every other detector failure.
    async fn predict(&self, image: EncodedImage) -> Result<Vec<Prediction>, Error>;
}

//! Prediction domain service.
//!
//! Normalises a client image and hands it to the detector. Detector runs are
//! bounded by a semaphore so a burst of requests cannot start an unbounded
//! number of detector processes. Callers beyond the limit wait for a permit,
//! at most for the permit timeout.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Semaphore;
use tracing::{error, info};

use crate::domain::ports::{
    DetectorError, ImageDecodeError, ImageNormalizer, ObjectDetector, PredictionQuery,
};
use crate::domain::{EncodedImage, Error, Prediction};

/// Message returned for any detector failure other than a timeout.
pub const DETECTION_FAILED_MESSAGE: &str = "Prediction failed";
/// Longest a request waits for a free detector slot unless configured.
pub const DEFAULT_PERMIT_TIMEOUT: Duration = Duration::from_secs(60);

fn map_decode_error(error: ImageDecodeError) -> Error {
    match error {
        ImageDecodeError::Worker { message } => {
            error!(%message, "image worker failed");
            Error::internal("image processing failed")
        }
        other => Error::invalid_image(other.to_string()),
    }
}

fn map_detector_error(error: DetectorError) -> Error {
    match error {
        DetectorError::Timeout { after } => {
            error!(?after, "detector timed out");
            Error::timeout(format!(
                "prediction did not complete within {} seconds",
                after.as_secs()
            ))
        }
        other => {
            error!(error = %other, "detector failed");
            Error::internal(DETECTION_FAILED_MESSAGE)
        }
    }
}

/// Service implementing [`PredictionQuery`].
#[derive(Clone)]
pub struct PredictionService<N, D> {
    normalizer: Arc<N>,
    detector: Arc<D>,
    permits: Arc<Semaphore>,
    permit_timeout: Duration,
}

impl<N, D> PredictionService<N, D> {
    /// Create a service allowing at most `max_concurrency` detector runs at
    /// once. A limit of zero is treated as one.
    pub fn new(normalizer: Arc<N>, detector: Arc<D>, max_concurrency: usize) -> Self {
        Self {
            normalizer,
            detector,
            permits: Arc::new(Semaphore::new(max_concurrency.max(1))),
            permit_timeout: DEFAULT_PERMIT_TIMEOUT,
        }
    }

    /// Bound the wait for a detector slot.
    #[must_use]
    pub fn with_permit_timeout(mut self, timeout: Duration) -> Self {
        self.permit_timeout = timeout;
        self
    }
}

#[async_trait]
impl<N, D> PredictionQuery for PredictionService<N, D>
where
    N: ImageNormalizer,
    D: ObjectDetector,
{
    async fn predict(&self, image: EncodedImage) -> Result<Vec<Prediction>, Error> {
        let normalized = self
            .normalizer
            .normalize(&image)
            .await
            .map_err(map_decode_error)?;

        let _permit = tokio::time::timeout(self.permit_timeout, self.permits.acquire())
            .await
            .map_err(|_| {
                error!(after = ?self.permit_timeout, "no detector slot became free");
                Error::timeout("prediction queue is full, try again later")
            })?
            .map_err(|_| Error::service_unavailable("detector is shutting down"))?;

        let predictions = self
            .detector
            .detect(&normalized)
            .await
            .map_err(map_detector_error)?;
        info!(count = predictions.len(), "prediction completed");
        Ok(predictions)
    }
}

#[cfg(test)]
#[path = "prediction_service_tests.rs"]
mod tests;

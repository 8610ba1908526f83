//! Driven port for the external object detector.
//!
//! Adapters run one detection per call. Exactly one of a prediction list or
//! a [`DetectorError`] is returned; a failing detector never yields an empty
//! success.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{NormalizedImage, Prediction};

use super::define_port_error;

define_port_error! {
    /// Failures raised while running the detector.
    pub enum DetectorError {
        /// The detector process could not be started.
        Spawn { message: String } => "detector could not be started: {message}",
        /// Writing the image or reading the detector output failed.
        Io { message: String } => "detector pipe failed: {message}",
        /// The detector wrote a structured error to stderr.
        Reported { detail: Value } => "detector reported an error: {detail}",
        /// The detector wrote non-JSON text to stderr.
        Unparseable { raw: String } => "detector error (unparseable): {raw}",
        /// The detector exited unsuccessfully without writing to stderr.
        /// `code` is absent when the process was killed by a signal.
        Exit { code: Option<i32> } => "detector exited with code {code:?}",
        /// The detector's stdout was not a JSON list of predictions.
        ResultParse { reason: String, raw: String } => "failed to parse detector output: {reason}",
        /// The detector did not finish before its deadline and was killed.
        Timeout { after: Duration } => "detector timed out after {after:?}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectDetector: Send + Sync {
    /// Run detection on a normalised image.
    async fn detect(&self, image: &NormalizedImage) -> Result<Vec<Prediction>, DetectorError>;
}

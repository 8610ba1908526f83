//! Detector adapter that runs one external process per detection.
//!
//! Protocol: the PNG image is written to the child's stdin, which is then
//! closed. The child answers with a JSON array of prediction objects on
//! stdout. Anything written to stderr means failure, whatever the exit code.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::domain::ports::{DetectorError, ObjectDetector};
use crate::domain::{NormalizedImage, Prediction};

/// Deadline applied to each detector run unless configured otherwise.
pub const DEFAULT_DETECTOR_TIMEOUT: Duration = Duration::from_secs(60);

const RAW_OUTPUT_LIMIT: usize = 4096;

/// Detector backed by an external command such as `python3 yolo_predict.py`.
///
/// The child is spawned with `kill_on_drop`, so a timed-out or cancelled
/// request never leaves a detector process behind.
#[derive(Debug, Clone)]
pub struct ProcessDetector {
    command: Vec<OsString>,
    working_dir: Option<PathBuf>,
    timeout: Duration,
}

impl ProcessDetector {
    /// Build a detector from a program and its arguments.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use leafscan::outbound::detector::ProcessDetector;
    ///
    /// let detector = ProcessDetector::new("python3", ["yolo_predict.py"])
    ///     .with_timeout(Duration::from_secs(30));
    /// assert_eq!(detector.command_label(), "python3 yolo_predict.py");
    /// ```
    pub fn new(
        program: impl Into<OsString>,
        args: impl IntoIterator<Item = impl Into<OsString>>,
    ) -> Self {
        let mut command = vec![program.into()];
        command.extend(args.into_iter().map(Into::into));

        Self {
            command,
            working_dir: None,
            timeout: DEFAULT_DETECTOR_TIMEOUT,
        }
    }

    /// Set the per-run deadline.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Per-run deadline.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run the detector from this directory (where its model weights live).
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Human-readable command line, for logs.
    pub fn command_label(&self) -> String {
        self.command
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    async fn run(&self, image: &NormalizedImage) -> Result<Vec<Prediction>, DetectorError> {
        let Some(program) = self.command.first() else {
            return Err(DetectorError::spawn("detector command is empty"));
        };

        let mut command = Command::new(program);
        command
            .args(self.command.iter().skip(1))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        let mut child = command.spawn().map_err(|err| {
            DetectorError::spawn(format!("{}: {err}", self.command_label()))
        })?;
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| DetectorError::io("detector stdin was not captured"))?;

        let bytes = image.as_bytes().to_vec();
        let write = async move {
            let result = stdin.write_all(&bytes).await;
            drop(stdin);
            result
        };
        // stdout and stderr are drained while stdin is still being written,
        // so a chatty child cannot block on a full pipe.
        let (written, output) = tokio::join!(write, child.wait_with_output());
        let output = output.map_err(|err| DetectorError::io(err.to_string()))?;

        if !output.stderr.is_empty() {
            return Err(stderr_failure(&output.stderr));
        }
        if !output.status.success() {
            return Err(DetectorError::exit(output.status.code()));
        }
        // A detector may stop reading once it has what it needs.
        if let Err(err) = written
            && err.kind() != std::io::ErrorKind::BrokenPipe
        {
            return Err(DetectorError::io(format!("writing image to detector: {err}")));
        }

        parse_predictions(&output.stdout)
    }
}

impl Default for ProcessDetector {
    fn default() -> Self {
        Self::new("python3", ["yolo_predict.py"])
    }
}

fn truncate_raw(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    let text = text.trim();
    match text.char_indices().nth(RAW_OUTPUT_LIMIT) {
        Some((cut, _)) => format!("{}...", text.get(..cut).unwrap_or(text)),
        None => text.to_owned(),
    }
}

fn stderr_failure(stderr: &[u8]) -> DetectorError {
    match serde_json::from_slice::<Value>(stderr) {
        Ok(detail) => DetectorError::reported(detail),
        Err(_) => DetectorError::unparseable(truncate_raw(stderr)),
    }
}

fn parse_predictions(stdout: &[u8]) -> Result<Vec<Prediction>, DetectorError> {
    serde_json::from_slice::<Vec<Prediction>>(stdout)
        .map_err(|err| DetectorError::result_parse(err.to_string(), truncate_raw(stdout)))
}

#[async_trait]
impl ObjectDetector for ProcessDetector {
    async fn detect(&self, image: &NormalizedImage) -> Result<Vec<Prediction>, DetectorError> {
        debug!(command = %self.command_label(), bytes = image.len(), "running detector");
        match tokio::time::timeout(self.timeout, self.run(image)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(command = %self.command_label(), timeout = ?self.timeout, "detector killed after deadline");
                Err(DetectorError::timeout(self.timeout))
            }
        }
    }
}

//! External object detector adapters.

mod process_detector;

pub use process_detector::{DEFAULT_DETECTOR_TIMEOUT, ProcessDetector};

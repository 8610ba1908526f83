//! Driving port for recording scan results.

use async_trait::async_trait;

use crate::domain::{Error, NewLeafScan, RecordedScan};

/// Domain use-case port for persisting a scan.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScanCommand: Send + Sync {
    /// Persist the scan and its history entry together.
    async fn record_scan(&self, scan: NewLeafScan) -> Result<RecordedScan, Error>;
}

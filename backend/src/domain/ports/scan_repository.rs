//! Driven port for scan persistence.

use async_trait::async_trait;

use crate::domain::{NewLeafScan, RecordedScan};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by scan repository adapters.
    pub enum ScanPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "scan repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "scan repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScanRepository: Send + Sync {
    /// Insert a `rice_leaf_scan` row and its `scan_history` row in one
    /// transaction.
    async fn record(&self, scan: &NewLeafScan) -> Result<RecordedScan, ScanPersistenceError>;
}

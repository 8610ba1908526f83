//! Scan domain service implementing [`ScanCommand`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::domain::ports::{ScanCommand, ScanPersistenceError, ScanRepository};
use crate::domain::{DATABASE_UNAVAILABLE_MESSAGE, Error, NewLeafScan, RecordedScan};

fn map_repository_error(failure: ScanPersistenceError) -> Error {
    let mapped = match &failure {
        ScanPersistenceError::Connection { .. } => {
            Error::service_unavailable(DATABASE_UNAVAILABLE_MESSAGE)
        }
        ScanPersistenceError::Query { .. } => Error::internal("scan could not be stored"),
    };
    error!(
        error = %failure,
        trace_id = mapped.trace_id().unwrap_or_default(),
        "scan repository failed"
    );
    mapped
}

/// Records scan results through a [`ScanRepository`].
#[derive(Clone)]
pub struct ScanService<R> {
    scans: Arc<R>,
}

impl<R> ScanService<R> {
    /// Create a new service with the scan repository.
    pub fn new(scans: Arc<R>) -> Self {
        Self { scans }
    }
}

#[async_trait]
impl<R> ScanCommand for ScanService<R>
where
    R: ScanRepository,
{
    async fn record_scan(&self, scan: NewLeafScan) -> Result<RecordedScan, Error> {
        let recorded = self
            .scans
            .record(&scan)
            .await
            .map_err(map_repository_error)?;
        debug!(
            rice_leaf_scan_id = %recorded.rice_leaf_scan_id,
            scan_history_id = %recorded.scan_history_id,
            "scan recorded"
        );
        Ok(recorded)
    }
}

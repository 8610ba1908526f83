//! PostgreSQL-backed scan repository.

use async_trait::async_trait;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{ScanPersistenceError, ScanRepository};
use crate::domain::{NewLeafScan, RecordedScan, ScanHistoryId, ScanId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewRiceLeafScanRow, NewScanHistoryRow};
use super::pool::DbPool;
use super::schema::{rice_leaf_scan, scan_history};

/// Diesel-backed implementation of [`ScanRepository`].
///
/// The scan row and its history row are written in one transaction, so
/// neither exists without the other.
#[derive(Clone)]
pub struct DieselScanRepository {
    pool: DbPool,
}

impl DieselScanRepository {
    /// Create a repository over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScanRepository for DieselScanRepository {
    async fn record(&self, scan: &NewLeafScan) -> Result<RecordedScan, ScanPersistenceError> {
        let scan_row = NewRiceLeafScanRow {
            user_profile_id: scan.user_profile_id().get(),
            disease_prediction: scan.disease_prediction(),
            disease_prediction_score: scan.disease_prediction_score(),
        };
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ScanPersistenceError::connection))?;

        let (scan_id, history_id) = conn
            .transaction(|conn| {
                async move {
                    let scan_id: i32 = diesel::insert_into(rice_leaf_scan::table)
                        .values(&scan_row)
                        .returning(rice_leaf_scan::id)
                        .get_result(conn)
                        .await?;

                    let history_id: i32 = diesel::insert_into(scan_history::table)
                        .values(&NewScanHistoryRow {
                            rice_leaf_scan_id: scan_id,
                        })
                        .returning(scan_history::id)
                        .get_result(conn)
                        .await?;

                    Ok((scan_id, history_id))
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| {
                map_diesel_error(
                    err,
                    ScanPersistenceError::query,
                    ScanPersistenceError::connection,
                )
            })?;

        Ok(RecordedScan {
            rice_leaf_scan_id: ScanId::new(scan_id),
            scan_history_id: ScanHistoryId::new(history_id),
        })
    }
}

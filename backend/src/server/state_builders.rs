//! Builders wiring outbound adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;

use leafscan::domain::{AccountService, PredictionService, ScanService};
use leafscan::inbound::http::state::{HttpState, HttpStatePorts};
use leafscan::outbound::imaging::PngImageNormalizer;
use leafscan::outbound::persistence::{DieselAccountRepository, DieselScanRepository};

use super::ServerConfig;

/// Build handler state from the configured pool, hasher and detector.
///
/// One [`AccountService`] serves both signup and login; every repository
/// shares the same pool.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let accounts = Arc::new(AccountService::new(
        Arc::new(DieselAccountRepository::new(config.db_pool.clone())),
        Arc::new(config.hasher),
    ));
    let scans = Arc::new(ScanService::new(Arc::new(DieselScanRepository::new(
        config.db_pool.clone(),
    ))));
    let predictions = Arc::new(PredictionService::new(
        Arc::new(PngImageNormalizer::new()),
        Arc::new(config.detector.clone()),
        config.detector_max_concurrency,
    )
    .with_permit_timeout(config.detector.timeout()));

    web::Data::new(HttpState::new(HttpStatePorts {
        signup: accounts.clone(),
        login: accounts,
        scans,
        predictions,
    }))
}

//! Leafscan entry-point: loads settings, migrates the database and serves
//! the HTTP API.

mod server;

use actix_web::web;
use color_eyre::eyre::{WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use leafscan::inbound::http::health::HealthState;
use leafscan::outbound::detector::ProcessDetector;
use leafscan::outbound::persistence::{DbPool, PoolConfig, apply_migrations};
use leafscan::settings::LeafscanSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        LeafscanSettings::load().map_err(|err| eyre!("failed to load settings: {err}"))?;
    let database_url = settings.database_url()?.to_owned();
    let bind_addr = settings.bind_addr()?;

    if settings.skip_migrations {
        info!(reason = "skip_migrations", "database migrations skipped");
    } else {
        apply_migrations(database_url.clone())
            .await
            .wrap_err("failed to apply database migrations")?;
    }

    let pool = DbPool::new(
        PoolConfig::new(database_url)
            .with_max_size(settings.db_max_connections())
            .with_connection_timeout(settings.db_connection_timeout()),
    )
    .await
    .wrap_err("failed to build database pool")?;

    let mut detector = ProcessDetector::new(settings.detector_program(), settings.detector_args())
        .with_timeout(settings.detector_timeout());
    if let Some(dir) = &settings.detector_working_dir {
        detector = detector.with_working_dir(dir);
    }
    info!(
        command = %detector.command_label(),
        max_concurrency = settings.detector_max_concurrency(),
        "detector configured"
    );

    let config = ServerConfig::new(bind_addr, pool)
        .with_max_body_bytes(settings.max_body_bytes())
        .with_detector(detector, settings.detector_max_concurrency());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "leafscan listening");
    server.await?;
    health_state.mark_unhealthy();
    Ok(())
}

//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `LEAFSCAN_*` environment variables and
//! configuration files, in increasing order of precedence as ortho_config
//! defines it. Unset values fall back to the defaults below.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_DB_CONNECTION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_DETECTOR_PROGRAM: &str = "python3";
const DEFAULT_DETECTOR_ARGS: &str = "yolo_predict.py";
const DEFAULT_DETECTOR_TIMEOUT_SECS: u64 = 60;
const DEFAULT_DETECTOR_MAX_CONCURRENCY: usize = 4;
/// Base64 photos from phones are large; the limit matches what mobile
/// clients have always been allowed to send.
const DEFAULT_MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Errors raised when settings are present but unusable.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// No database URL was configured.
    #[error("database_url is required (set LEAFSCAN_DATABASE_URL)")]
    MissingDatabaseUrl,
    /// The bind address could not be parsed.
    #[error("invalid bind_addr {value:?}: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Runtime settings for the leafscan service.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LEAFSCAN")]
pub struct LeafscanSettings {
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Socket address the HTTP server listens on.
    pub bind_addr: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Seconds to wait for a pooled connection before failing.
    pub db_connection_timeout_secs: Option<u64>,
    /// Detector executable.
    pub detector_program: Option<String>,
    /// Whitespace-separated detector arguments.
    pub detector_args: Option<String>,
    /// Directory the detector runs from.
    pub detector_working_dir: Option<PathBuf>,
    /// Seconds a single detector run may take before it is killed.
    pub detector_timeout_secs: Option<u64>,
    /// Maximum number of detector processes running at once.
    pub detector_max_concurrency: Option<usize>,
    /// Maximum accepted JSON body size in bytes.
    pub max_body_bytes: Option<usize>,
    /// Skip applying embedded migrations at startup.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
}

impl LeafscanSettings {
    /// Configured database URL.
    ///
    /// # Errors
    /// Returns [`SettingsError::MissingDatabaseUrl`] when unset or blank.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// Socket address to bind.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidBindAddr`] when the value does not
    /// parse as `host:port`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                source,
            })
    }

    /// Pool size.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Pool checkout timeout.
    pub fn db_connection_timeout(&self) -> Duration {
        Duration::from_secs(
            self.db_connection_timeout_secs
                .unwrap_or(DEFAULT_DB_CONNECTION_TIMEOUT_SECS),
        )
    }

    /// Detector program.
    pub fn detector_program(&self) -> &str {
        self.detector_program
            .as_deref()
            .unwrap_or(DEFAULT_DETECTOR_PROGRAM)
    }

    /// Detector arguments, split on whitespace.
    pub fn detector_args(&self) -> Vec<String> {
        self.detector_args
            .as_deref()
            .unwrap_or(DEFAULT_DETECTOR_ARGS)
            .split_whitespace()
            .map(str::to_owned)
            .collect()
    }

    /// Per-run detector deadline.
    pub fn detector_timeout(&self) -> Duration {
        Duration::from_secs(
            self.detector_timeout_secs
                .unwrap_or(DEFAULT_DETECTOR_TIMEOUT_SECS),
        )
    }

    /// Detector concurrency cap; never below one.
    pub fn detector_max_concurrency(&self) -> usize {
        self.detector_max_concurrency
            .unwrap_or(DEFAULT_DETECTOR_MAX_CONCURRENCY)
            .max(1)
    }

    /// JSON body limit in bytes.
    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes.unwrap_or(DEFAULT_MAX_BODY_BYTES)
    }
}

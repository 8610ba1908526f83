//! Embedded schema migrations.
//!
//! `backend/migrations` is compiled into the binary so a deployment only
//! needs a database URL. Diesel's migration harness is synchronous, so the
//! async entry point runs it on the blocking pool.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::domain::TraceId;

/// Migrations from the `backend/migrations` directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Failures while applying migrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    /// The migration connection could not be opened.
    #[error("failed to connect for migrations: {message}")]
    Connect { message: String },
    /// A migration failed to apply.
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
    /// The blocking worker running the migrations failed.
    #[error("migration worker failed: {message}")]
    Worker { message: String },
}

/// Apply every pending migration, returning the versions applied.
///
/// # Errors
/// Returns [`MigrationError`] when connecting or applying fails.
pub fn run_pending_migrations(database_url: &str) -> Result<Vec<String>, MigrationError> {
    let mut conn = PgConnection::establish(database_url).map_err(|err| MigrationError::Connect {
        message: err.to_string(),
    })?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?
        .into_iter()
        .map(|version| version.to_string())
        .collect::<Vec<_>>();
    info!(count = applied.len(), versions = ?applied, "migrations applied");
    Ok(applied)
}

/// Async wrapper around [`run_pending_migrations`].
///
/// # Errors
/// Returns [`MigrationError`] when connecting or applying fails, or when the
/// blocking worker cannot be joined.
pub async fn apply_migrations(database_url: String) -> Result<Vec<String>, MigrationError> {
    TraceId::spawn_blocking(move || run_pending_migrations(&database_url))
        .await
        .map_err(|err| MigrationError::Worker {
            message: err.to_string(),
        })?
}

//! Shared helper utilities for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! each suite pulls this module in with `mod support;`. Not every suite uses
//! every helper.
#![allow(dead_code, reason = "each integration test crate uses a subset of the helpers")]

pub mod cluster_skip;
pub mod pg_embed;

use leafscan::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use pg_embedded_setup_unpriv::{TemporaryDatabase, TestCluster};
use postgres::{Client, NoTls};
use tokio::runtime::Runtime;
use uuid::Uuid;

pub use cluster_skip::handle_cluster_setup_failure;

/// Render a `postgres` error with enough detail to be useful in CI logs.
///
/// The `Display` implementation collapses database errors to `db error`, so
/// prefer the SQLSTATE and server message when available.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// A migrated temporary database with a Diesel pool and a runtime to drive it.
///
/// Integration suites stay synchronous and reuse `runtime` for every async
/// call; the embedded cluster bootstrap must not run inside a Tokio runtime.
pub struct DatabaseContext {
    pub runtime: Runtime,
    pub pool: DbPool,
    pub url: String,
    // Dropped before the cluster that owns it.
    _database: TemporaryDatabase,
    _cluster: TestCluster,
}

impl DatabaseContext {
    /// Start a cluster, create a fresh database and apply every migration.
    pub fn start() -> Result<Self, String> {
        assert!(
            tokio::runtime::Handle::try_current().is_err(),
            "start the database context outside a Tokio runtime"
        );

        let cluster = pg_embed::test_cluster()?;
        let name = format!("leafscan_{}", Uuid::new_v4().simple());
        let database = cluster
            .temporary_database(name.as_str())
            .map_err(|err| format!("create database: {err:?}"))?;
        let url = database.url().to_owned();
        run_pending_migrations(&url).map_err(|err| err.to_string())?;

        let runtime = Runtime::new().map_err(|err| err.to_string())?;
        let pool = runtime
            .block_on(DbPool::new(PoolConfig::new(&url).with_max_size(4)))
            .map_err(|err| err.to_string())?;

        Ok(Self {
            runtime,
            pool,
            url,
            _database: database,
            _cluster: cluster,
        })
    }

    /// Run raw SQL, bypassing Diesel, to inspect or break the schema.
    pub fn client(&self) -> Client {
        Client::connect(&self.url, NoTls)
            .unwrap_or_else(|err| panic!("connect: {}", format_postgres_error(&err)))
    }

    /// Number of rows in `table`.
    pub fn count_rows(&self, table: &str) -> i64 {
        self.client()
            .query_one(format!("SELECT COUNT(*) FROM {table}").as_str(), &[])
            .unwrap_or_else(|err| panic!("count {table}: {}", format_postgres_error(&err)))
            .get(0)
    }

    /// Execute a batch of SQL statements.
    pub fn execute(&self, sql: &str) {
        self.client()
            .batch_execute(sql)
            .unwrap_or_else(|err| panic!("execute: {}", format_postgres_error(&err)));
    }
}

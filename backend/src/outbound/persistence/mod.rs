//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories share one [`DbPool`] and translate between Diesel row
//! structs (`models.rs`) and domain types. Multi-row writes run inside a
//! single transaction; any failed statement rolls the whole write back.
//!
//! # Example
//!
//! ```no_run
//! use leafscan::outbound::persistence::{DbPool, DieselScanRepository, PoolConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/leafscan")).await?;
//! let scans = DieselScanRepository::new(pool);
//! # let _ = scans;
//! # Ok(())
//! # }
//! ```

mod diesel_account_repository;
mod diesel_error_mapping;
mod diesel_scan_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_account_repository::DieselAccountRepository;
pub use diesel_scan_repository::DieselScanRepository;
pub use migrations::{MIGRATIONS, MigrationError, apply_migrations, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};

//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use leafscan::outbound::detector::ProcessDetector;
use leafscan::outbound::hashing::BcryptPasswordHasher;
use leafscan::outbound::persistence::DbPool;

const DEFAULT_MAX_BODY_BYTES: usize = 50 * 1024 * 1024;
const DEFAULT_DETECTOR_CONCURRENCY: usize = 4;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) max_body_bytes: usize,
    pub(crate) detector: ProcessDetector,
    pub(crate) detector_max_concurrency: usize,
    pub(crate) hasher: BcryptPasswordHasher,
}

impl ServerConfig {
    /// Construct a configuration with the default detector, body limit and
    /// bcrypt cost.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool) -> Self {
        Self {
            bind_addr,
            db_pool,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            detector: ProcessDetector::default(),
            detector_max_concurrency: DEFAULT_DETECTOR_CONCURRENCY,
            hasher: BcryptPasswordHasher::default(),
        }
    }

    /// Limit accepted JSON bodies to `bytes`.
    #[must_use]
    pub fn with_max_body_bytes(mut self, bytes: usize) -> Self {
        self.max_body_bytes = bytes;
        self
    }

    /// Use `detector`, allowing at most `max_concurrency` runs at once.
    #[must_use]
    pub fn with_detector(mut self, detector: ProcessDetector, max_concurrency: usize) -> Self {
        self.detector = detector;
        self.detector_max_concurrency = max_concurrency.max(1);
        self
    }

    /// Replace the password hasher.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "Exercised by tests to keep bcrypt cheap")
    )]
    #[must_use]
    pub fn with_hasher(mut self, hasher: BcryptPasswordHasher) -> Self {
        self.hasher = hasher;
        self
    }
}

//! Skip policy for suites that need the embedded PostgreSQL cluster.
//!
//! Environments without the binaries (or without network access to fetch
//! them) set `SKIP_TEST_CLUSTER=1`; every suite then reports the skip with
//! the same marker instead of failing.

/// Returns true when `SKIP_TEST_CLUSTER` is "1", "true" or "yes"
/// (case-insensitive).
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Handle a cluster setup failure.
///
/// Prints a `SKIP-TEST-CLUSTER` marker and returns `None` when skipping is
/// allowed; panics otherwise so CI breakage is not masked.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

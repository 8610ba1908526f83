//! HTTP inbound adapter exposing REST endpoints.

pub mod accounts;
pub mod error;
pub mod health;
pub mod predictions;
pub mod scans;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// JSON extractor configuration shared by every endpoint: bodies up to
/// `limit` bytes, with extractor failures reported as `invalid_request`.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(error::json_error_handler)
}

//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed entities shared by the HTTP and persistence
//! adapters, plus the services implementing the driving ports. Types keep
//! their invariants in constructors; serialisation contracts are documented
//! on each type.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - SignupForm, LoginCredentials, AuthenticatedUser: account lifecycle.
//! - NewLeafScan, RecordedScan: scan persistence.
//! - EncodedImage, NormalizedImage, Prediction: detection pipeline.
//! - AccountService, ScanService, PredictionService: driving port
//!   implementations.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod ports;
pub mod prediction;
pub mod prediction_service;
pub mod scan;
pub mod scan_service;
pub mod trace_id;
pub mod user;

pub use self::account_service::{AccountService, DUPLICATE_USER_MESSAGE};
pub use self::auth::{LoginCredentials, LoginValidationError, PasswordDigest};
pub use self::error::{DATABASE_UNAVAILABLE_MESSAGE, Error, ErrorCode, TRACE_ID_HEADER};
pub use self::prediction::{BoundingBox, EncodedImage, NormalizedImage, Prediction};
pub use self::prediction_service::{
    DEFAULT_PERMIT_TIMEOUT, DETECTION_FAILED_MESSAGE, PredictionService,
};
pub use self::scan::{
    DISEASE_LABEL_MAX, NewLeafScan, RecordedScan, ScanHistoryId, ScanId, ScanValidationError,
    UserProfileId,
};
pub use self::scan_service::ScanService;
pub use self::trace_id::TraceId;
pub use self::user::{
    ACCOUNT_FIELD_MAX, AGE_MAX, AccountValidationError, AuthenticatedUser, Email, NewAccount,
    ProfileDetails, SignupDraft, SignupForm, StoredCredentials, UserId, Username,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use leafscan::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::invalid_request("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;

//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, hasher, image normaliser, detector) are
//! implemented by `outbound` adapters. Driving ports (signup, login, scan,
//! prediction) are what `inbound` adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod account_repository;
mod image_normalizer;
mod login_service;
mod object_detector;
mod password_hasher;
mod prediction_query;
mod scan_command;
mod scan_repository;
mod signup_command;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountPersistenceError, AccountRepository};
#[cfg(test)]
pub use image_normalizer::MockImageNormalizer;
pub use image_normalizer::{ImageDecodeError, ImageNormalizer};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{INVALID_LOGIN_MESSAGE, LoginService};
#[cfg(test)]
pub use object_detector::MockObjectDetector;
pub use object_detector::{DetectorError, ObjectDetector};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use prediction_query::MockPredictionQuery;
pub use prediction_query::PredictionQuery;
#[cfg(test)]
pub use scan_command::MockScanCommand;
pub use scan_command::ScanCommand;
#[cfg(test)]
pub use scan_repository::MockScanRepository;
pub use scan_repository::{ScanPersistenceError, ScanRepository};
#[cfg(test)]
pub use signup_command::MockSignupCommand;
pub use signup_command::SignupCommand;

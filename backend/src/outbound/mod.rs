//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **hashing**: bcrypt password digests
//! - **imaging**: base64 decoding and PNG re-encoding of uploads
//! - **detector**: the external YOLO detector process
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod detector;
pub mod hashing;
pub mod imaging;
pub mod persistence;

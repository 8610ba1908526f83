//! Driven port wrapping a salted one-way password hash.

use async_trait::async_trait;

use crate::domain::PasswordDigest;

use super::define_port_error;

define_port_error! {
    /// Failures raised by password hashers.
    pub enum PasswordHashError {
        /// Producing a digest failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// The stored digest could not be checked (malformed or worker failure).
        Verify { message: String } => "password verification failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Produce a salted digest of `plaintext`.
    async fn hash(&self, plaintext: &str) -> Result<PasswordDigest, PasswordHashError>;

    /// Check `plaintext` against a stored digest.
    async fn verify(
        &self,
        plaintext: &str,
        digest: &PasswordDigest,
    ) -> Result<bool, PasswordHashError>;
}

//! Driven port for account persistence.
//!
//! Creating an account writes the `users` row and its `user_profile` row in
//! one transaction. Uniqueness of username and email is enforced by the
//! store; adapters report a violation as [`AccountPersistenceError::DuplicateUser`]
//! rather than checking beforehand.

use async_trait::async_trait;

use crate::domain::{NewAccount, StoredCredentials, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by account repository adapters.
    pub enum AccountPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "account repository query failed: {message}",
        /// Username or email is already registered.
        DuplicateUser { message: String } => "account already exists: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Atomically insert a user and its profile, returning the generated
    /// user identifier. Nothing is written when any insert fails.
    async fn create_account(&self, account: &NewAccount) -> Result<UserId, AccountPersistenceError>;

    /// Look up the stored credentials for a username.
    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, AccountPersistenceError>;
}

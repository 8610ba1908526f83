//! Account domain service.
//!
//! Implements the signup and login driving ports on top of an
//! [`AccountRepository`] and a [`PasswordHasher`].

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{debug, error, warn};

use crate::domain::ports::{
    AccountPersistenceError, AccountRepository, INVALID_LOGIN_MESSAGE, LoginService,
    PasswordHashError, PasswordHasher, SignupCommand,
};
use crate::domain::{
    AuthenticatedUser, DATABASE_UNAVAILABLE_MESSAGE, Error, LoginCredentials, PasswordDigest,
    SignupForm, UserId,
};

/// Message returned when signup collides with an existing account.
pub const DUPLICATE_USER_MESSAGE: &str = "Username or email already exists";

/// Plaintext hashed once per service so unknown usernames cost one verify,
/// like a wrong password does.
const UNKNOWN_USER_PASSWORD: &str = "leafscan-unknown-user";

fn map_repository_error(failure: AccountPersistenceError) -> Error {
    let mapped = match &failure {
        AccountPersistenceError::Connection { .. } => {
            Error::service_unavailable(DATABASE_UNAVAILABLE_MESSAGE)
        }
        AccountPersistenceError::Query { .. } => Error::internal("account could not be stored"),
        AccountPersistenceError::DuplicateUser { .. } => {
            return Error::duplicate_user(DUPLICATE_USER_MESSAGE);
        }
    };
    error!(
        error = %failure,
        trace_id = mapped.trace_id().unwrap_or_default(),
        "account repository failed"
    );
    mapped
}

fn map_hash_error(error: PasswordHashError) -> Error {
    warn!(error = %error, "password hashing failed");
    Error::internal("password processing failed")
}

/// Service implementing [`SignupCommand`] and [`LoginService`].
#[derive(Clone)]
pub struct AccountService<R, H> {
    accounts: Arc<R>,
    hasher: Arc<H>,
    unknown_user_digest: Arc<OnceCell<PasswordDigest>>,
}

impl<R, H> AccountService<R, H> {
    /// Create a service over the given repository and hasher.
    pub fn new(accounts: Arc<R>, hasher: Arc<H>) -> Self {
        Self {
            accounts,
            hasher,
            unknown_user_digest: Arc::new(OnceCell::new()),
        }
    }
}

impl<R, H> AccountService<R, H>
where
    H: PasswordHasher,
{
    /// Spend one verify on a digest no account owns.
    async fn verify_against_unknown_user(&self, password: &str) -> Result<(), PasswordHashError> {
        let digest = self
            .unknown_user_digest
            .get_or_try_init(|| self.hasher.hash(UNKNOWN_USER_PASSWORD))
            .await?;
        self.hasher.verify(password, digest).await?;
        Ok(())
    }
}

#[async_trait]
impl<R, H> SignupCommand for AccountService<R, H>
where
    R: AccountRepository,
    H: PasswordHasher,
{
    async fn register(&self, form: SignupForm) -> Result<UserId, Error> {
        let digest = self
            .hasher
            .hash(form.password())
            .await
            .map_err(map_hash_error)?;
        let account = form.into_new_account(digest);
        let user_id = self
            .accounts
            .create_account(&account)
            .await
            .map_err(map_repository_error)?;
        debug!(user_id = %user_id, "account registered");
        Ok(user_id)
    }
}

#[async_trait]
impl<R, H> LoginService for AccountService<R, H>
where
    R: AccountRepository,
    H: PasswordHasher,
{
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthenticatedUser, Error> {
        let Some(stored) = self
            .accounts
            .find_credentials(credentials.username())
            .await
            .map_err(map_repository_error)?
        else {
            if let Err(failure) = self
                .verify_against_unknown_user(credentials.password())
                .await
            {
                warn!(error = %failure, "unknown-user verify failed");
            }
            return Err(Error::invalid_credentials(INVALID_LOGIN_MESSAGE));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), &stored.password_digest)
            .await
            .map_err(map_hash_error)?;
        if !matches {
            return Err(Error::invalid_credentials(INVALID_LOGIN_MESSAGE));
        }

        Ok(AuthenticatedUser::from(stored))
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;

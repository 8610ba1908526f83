//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call it to authenticate credentials without knowing the
//! backing store, so HTTP handler tests can substitute a test double.

use async_trait::async_trait;

use crate::domain::{AuthenticatedUser, Error, LoginCredentials};

/// Message returned for both unknown usernames and wrong passwords.
pub const INVALID_LOGIN_MESSAGE: &str = "invalid username or password";

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user.
    ///
    /// Unknown usernames and wrong passwords fail identically with
    /// [`ErrorCode::InvalidCredentials`](crate::domain::ErrorCode::InvalidCredentials)
    /// and [`INVALID_LOGIN_MESSAGE`].
    async fn authenticate(&self, credentials: &LoginCredentials)
    -> Result<AuthenticatedUser, Error>;
}

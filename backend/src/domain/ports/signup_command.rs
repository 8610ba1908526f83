//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Error, SignupForm, UserId};

/// Domain use-case port for signing up.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignupCommand: Send + Sync {
    /// Hash the password and atomically create the user and its profile.
    ///
    /// # Errors
    /// - [`ErrorCode::DuplicateUser`](crate::domain::ErrorCode::DuplicateUser)
    ///   when the username or email is taken.
    /// - Service-unavailable or internal errors for persistence failures.
    async fn register(&self, form: SignupForm) -> Result<UserId, Error>;
}

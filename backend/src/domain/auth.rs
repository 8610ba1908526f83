//! Authentication primitives: login credentials and password digests.
//!
//! Plaintext passwords only ever live inside [`Zeroizing`] buffers and are
//! never serialised.

use std::fmt;

use zeroize::Zeroizing;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by the login service.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` must be non-empty but keeps caller-provided whitespace so
///   digests are verified against exactly what the user typed.
///
/// # Examples
/// ```
/// use leafscan::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" farmer ", "paddy").unwrap();
/// assert_eq!(creds.username(), "farmer");
/// assert_eq!(creds.password(), "paddy");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username used for the account lookup.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Salted one-way digest of a password, as produced by a
/// [`PasswordHasher`](crate::domain::ports::PasswordHasher).
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap a digest string produced by a hasher or read from storage.
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    /// Digest text as stored in the `users.password` column.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("farmer", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  farmer  ", "secret")]
    #[case("alice", " leading and trailing ")]
    fn valid_credentials_trim_username_only(#[case] username: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(username, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.username(), username.trim());
        assert_eq!(creds.password(), password);
    }

    #[test]
    fn credentials_debug_output_hides_password() {
        let creds = LoginCredentials::try_from_parts("farmer", "paddy-field-42").expect("valid");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("farmer"));
        assert!(!rendered.contains("paddy-field-42"));
    }

    #[test]
    fn digest_debug_output_is_redacted() {
        let digest = PasswordDigest::new("$2b$10$abcdefghijklmnopqrstuv");
        assert_eq!(format!("{digest:?}"), "PasswordDigest(..)");
        assert_eq!(digest.as_str(), "$2b$10$abcdefghijklmnopqrstuv");
    }
}

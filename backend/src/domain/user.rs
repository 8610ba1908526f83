//! User accounts and their profiles.
//!
//! A user row and its profile row are always created together; the types
//! here describe a signup before it is persisted ([`SignupForm`],
//! [`NewAccount`]) and what login reads back ([`StoredCredentials`],
//! [`AuthenticatedUser`]).

use std::fmt;

use serde::Serialize;
use zeroize::Zeroizing;

use super::PasswordDigest;

/// Maximum length accepted for free-text account fields.
pub const ACCOUNT_FIELD_MAX: usize = 255;
/// Largest accepted value for a profile age.
pub const AGE_MAX: i32 = 150;

/// Validation errors raised while building a [`SignupForm`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountValidationError {
    /// A required field was empty once trimmed.
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
    /// A field exceeded [`ACCOUNT_FIELD_MAX`] characters.
    #[error("{field} must be at most {max} characters")]
    FieldTooLong { field: &'static str, max: usize },
    /// Age was negative or above [`AGE_MAX`].
    #[error("age must be between 0 and {max}")]
    AgeOutOfRange { max: i32 },
}

impl AccountValidationError {
    /// Name of the offending request field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyField { field } | Self::FieldTooLong { field, .. } => field,
            Self::AgeOutOfRange { .. } => "age",
        }
    }
}

fn required_text(value: &str, field: &'static str) -> Result<String, AccountValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AccountValidationError::EmptyField { field });
    }
    if trimmed.chars().count() > ACCOUNT_FIELD_MAX {
        return Err(AccountValidationError::FieldTooLong {
            field,
            max: ACCOUNT_FIELD_MAX,
        });
    }
    Ok(trimmed.to_owned())
}

/// Identifier generated by the store for a `users` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a generated identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw integer value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique login name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Validate and construct a username.
    ///
    /// # Examples
    /// ```
    /// use leafscan::domain::Username;
    ///
    /// assert_eq!(Username::new("  juan ").unwrap().as_ref(), "juan");
    /// assert!(Username::new(" ").is_err());
    /// ```
    pub fn new(value: &str) -> Result<Self, AccountValidationError> {
        required_text(value, "username").map(Self)
    }

    /// Wrap a username read back from storage.
    pub(crate) fn from_stored(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Unique contact email.
///
/// Only presence and length are checked; deliverability is not this
/// service's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    /// Validate and construct an email address.
    pub fn new(value: &str) -> Result<Self, AccountValidationError> {
        required_text(value, "email").map(Self)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Personal details stored in `user_profile`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDetails {
    firstname: String,
    lastname: String,
    age: Option<i32>,
    gender: String,
    mobile_number: String,
}

impl ProfileDetails {
    /// First name.
    pub fn firstname(&self) -> &str {
        &self.firstname
    }

    /// Last name.
    pub fn lastname(&self) -> &str {
        &self.lastname
    }

    /// Age in years, when supplied.
    pub fn age(&self) -> Option<i32> {
        self.age
    }

    /// Gender as entered by the user.
    pub fn gender(&self) -> &str {
        &self.gender
    }

    /// Mobile phone number as entered by the user.
    pub fn mobile_number(&self) -> &str {
        &self.mobile_number
    }
}

/// Raw signup fields after transport decoding.
#[derive(Clone, Default)]
pub struct SignupDraft {
    pub username: String,
    pub email: String,
    pub password: Zeroizing<String>,
    pub firstname: String,
    pub lastname: String,
    pub age: Option<i32>,
    pub gender: String,
    pub mobile_number: String,
}

impl fmt::Debug for SignupDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupDraft")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("firstname", &self.firstname)
            .field("lastname", &self.lastname)
            .field("age", &self.age)
            .field("gender", &self.gender)
            .field("mobile_number", &self.mobile_number)
            .finish()
    }
}

/// Validated signup request.
///
/// ## Invariants
/// - Every text field is trimmed, non-empty and at most
///   [`ACCOUNT_FIELD_MAX`] characters.
/// - The password is non-empty and kept verbatim.
/// - `age`, when present, lies in `0..=AGE_MAX`.
#[derive(Clone)]
pub struct SignupForm {
    username: Username,
    email: Email,
    password: Zeroizing<String>,
    profile: ProfileDetails,
}

impl SignupForm {
    /// Username requested by the caller.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Email requested by the caller.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Plaintext password to be hashed before storage.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Profile details to store alongside the user row.
    pub fn profile(&self) -> &ProfileDetails {
        &self.profile
    }

    /// Combine the form with a password digest, ready for persistence.
    pub fn into_new_account(self, password_digest: PasswordDigest) -> NewAccount {
        NewAccount {
            username: self.username,
            email: self.email,
            password_digest,
            profile: self.profile,
        }
    }
}

impl fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("profile", &self.profile)
            .finish()
    }
}

impl TryFrom<SignupDraft> for SignupForm {
    type Error = AccountValidationError;

    fn try_from(draft: SignupDraft) -> Result<Self, Self::Error> {
        let username = Username::new(&draft.username)?;
        let email = Email::new(&draft.email)?;
        if draft.password.is_empty() {
            return Err(AccountValidationError::EmptyField { field: "password" });
        }
        let firstname = required_text(&draft.firstname, "firstname")?;
        let lastname = required_text(&draft.lastname, "lastname")?;
        if draft.age.is_some_and(|age| !(0..=AGE_MAX).contains(&age)) {
            return Err(AccountValidationError::AgeOutOfRange { max: AGE_MAX });
        }
        let gender = required_text(&draft.gender, "gender")?;
        let mobile_number = required_text(&draft.mobile_number, "mobilenumber")?;

        Ok(Self {
            username,
            email,
            password: draft.password,
            profile: ProfileDetails {
                firstname,
                lastname,
                age: draft.age,
                gender,
                mobile_number,
            },
        })
    }
}

/// Account ready to be written: user row plus profile row.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: Username,
    pub email: Email,
    pub password_digest: PasswordDigest,
    pub profile: ProfileDetails,
}

/// Credentials read back for a login attempt.
#[derive(Debug, Clone)]
pub struct StoredCredentials {
    pub user_id: UserId,
    pub username: Username,
    pub password_digest: PasswordDigest,
}

/// Successful login outcome returned to clients.
///
/// Never carries the password digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub username: Username,
}

impl From<StoredCredentials> for AuthenticatedUser {
    fn from(value: StoredCredentials) -> Self {
        Self {
            id: value.user_id,
            username: value.username,
        }
    }
}

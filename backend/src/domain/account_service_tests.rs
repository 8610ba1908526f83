//! Tests for the account service.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::{fixture, rstest};
use zeroize::Zeroizing;

use super::*;
use crate::domain::ports::{MockAccountRepository, MockPasswordHasher};
use crate::domain::{ErrorCode, PasswordDigest, SignupDraft, StoredCredentials, Username};

#[fixture]
fn form() -> SignupForm {
    SignupForm::try_from(SignupDraft {
        username: "juan".to_owned(),
        email: "juan@example.com".to_owned(),
        password: Zeroizing::new("s3cret".to_owned()),
        firstname: "Juan".to_owned(),
        lastname: "Dela Cruz".to_owned(),
        age: Some(42),
        gender: "male".to_owned(),
        mobile_number: "09171234567".to_owned(),
    })
    .expect("valid form")
}

fn stored(password_digest: &str) -> StoredCredentials {
    StoredCredentials {
        user_id: UserId::new(7),
        username: Username::from_stored("juan".to_owned()),
        password_digest: PasswordDigest::new(password_digest),
    }
}

fn credentials(password: &str) -> LoginCredentials {
    LoginCredentials::try_from_parts("juan", password).expect("valid credentials")
}

fn service(
    repo: MockAccountRepository,
    hasher: MockPasswordHasher,
) -> AccountService<MockAccountRepository, MockPasswordHasher> {
    AccountService::new(Arc::new(repo), Arc::new(hasher))
}

#[rstest]
#[tokio::test]
async fn register_stores_the_digest_not_the_password(form: SignupForm) {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .with(eq("s3cret"))
        .times(1)
        .return_once(|_| Ok(PasswordDigest::new("$2b$10$digest")));

    let mut repo = MockAccountRepository::new();
    repo.expect_create_account()
        .withf(|account| {
            account.password_digest.as_str() == "$2b$10$digest"
                && account.username.as_ref() == "juan"
                && account.profile.firstname() == "Juan"
        })
        .times(1)
        .return_once(|_| Ok(UserId::new(11)));

    let user_id = service(repo, hasher)
        .register(form)
        .await
        .expect("signup succeeds");
    assert_eq!(user_id, UserId::new(11));
}

#[rstest]
#[tokio::test]
async fn register_maps_duplicates_to_duplicate_user(form: SignupForm) {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .return_once(|_| Ok(PasswordDigest::new("$2b$10$digest")));
    let mut repo = MockAccountRepository::new();
    repo.expect_create_account()
        .return_once(|_| Err(AccountPersistenceError::duplicate_user("users_username_key")));

    let err = service(repo, hasher)
        .register(form)
        .await
        .expect_err("duplicate must fail");
    assert_eq!(err.code(), ErrorCode::DuplicateUser);
    assert_eq!(err.message(), DUPLICATE_USER_MESSAGE);
}

#[rstest]
#[case(AccountPersistenceError::connection("pool exhausted"), ErrorCode::ServiceUnavailable)]
#[case(AccountPersistenceError::query("syntax error"), ErrorCode::InternalError)]
#[tokio::test]
async fn register_maps_repository_failures(
    form: SignupForm,
    #[case] failure: AccountPersistenceError,
    #[case] expected: ErrorCode,
) {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .return_once(|_| Ok(PasswordDigest::new("$2b$10$digest")));
    let mut repo = MockAccountRepository::new();
    repo.expect_create_account().return_once(move |_| Err(failure));

    let err = service(repo, hasher)
        .register(form)
        .await
        .expect_err("repository failure");
    assert_eq!(err.code(), expected);
}

#[rstest]
#[tokio::test]
async fn register_skips_persistence_when_hashing_fails(form: SignupForm) {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .return_once(|_| Err(PasswordHashError::hash("worker panicked")));
    let mut repo = MockAccountRepository::new();
    repo.expect_create_account().times(0);

    let err = service(repo, hasher)
        .register(form)
        .await
        .expect_err("hash failure");
    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[tokio::test]
async fn authenticate_returns_user_on_match() {
    let mut repo = MockAccountRepository::new();
    repo.expect_find_credentials()
        .with(eq("juan"))
        .return_once(|_| Ok(Some(stored("$2b$10$digest"))));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_verify()
        .withf(|plain, digest| plain == "s3cret" && digest.as_str() == "$2b$10$digest")
        .return_once(|_, _| Ok(true));

    let user = service(repo, hasher)
        .authenticate(&credentials("s3cret"))
        .await
        .expect("login succeeds");
    assert_eq!(user.id, UserId::new(7));
    assert_eq!(user.username.as_ref(), "juan");
}

#[tokio::test]
async fn authenticate_rejects_unknown_user_after_a_verify() {
    let mut repo = MockAccountRepository::new();
    repo.expect_find_credentials().return_once(|_| Ok(None));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .with(eq(UNKNOWN_USER_PASSWORD))
        .times(1)
        .return_once(|_| Ok(PasswordDigest::new("$2b$10$unknown")));
    hasher
        .expect_verify()
        .withf(|plain, digest| plain == "s3cret" && digest.as_str() == "$2b$10$unknown")
        .times(1)
        .return_once(|_, _| Ok(false));

    let err = service(repo, hasher)
        .authenticate(&credentials("s3cret"))
        .await
        .expect_err("unknown user");
    assert_eq!(err.code(), ErrorCode::InvalidCredentials);
    assert_eq!(err.message(), INVALID_LOGIN_MESSAGE);
}

#[tokio::test]
async fn unknown_user_digest_is_hashed_once() {
    let mut repo = MockAccountRepository::new();
    repo.expect_find_credentials().times(3).returning(|_| Ok(None));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .times(1)
        .returning(|_| Ok(PasswordDigest::new("$2b$10$unknown")));
    hasher.expect_verify().times(3).returning(|_, _| Ok(false));

    let accounts = service(repo, hasher);
    for _ in 0..3 {
        let err = accounts
            .authenticate(&credentials("s3cret"))
            .await
            .expect_err("unknown user");
        assert_eq!(err.code(), ErrorCode::InvalidCredentials);
    }
}

#[tokio::test]
async fn unknown_user_stays_invalid_credentials_when_hashing_fails() {
    let mut repo = MockAccountRepository::new();
    repo.expect_find_credentials().return_once(|_| Ok(None));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .return_once(|_| Err(PasswordHashError::hash("worker panicked")));
    hasher.expect_verify().times(0);

    let err = service(repo, hasher)
        .authenticate(&credentials("s3cret"))
        .await
        .expect_err("unknown user");
    assert_eq!(err.code(), ErrorCode::InvalidCredentials);
    assert_eq!(err.message(), INVALID_LOGIN_MESSAGE);
}

#[tokio::test]
async fn authenticate_rejects_wrong_password_with_same_message() {
    let mut repo = MockAccountRepository::new();
    repo.expect_find_credentials()
        .return_once(|_| Ok(Some(stored("$2b$10$digest"))));
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_verify().return_once(|_, _| Ok(false));

    let err = service(repo, hasher)
        .authenticate(&credentials("wrong"))
        .await
        .expect_err("wrong password");
    assert_eq!(err.code(), ErrorCode::InvalidCredentials);
    assert_eq!(err.message(), INVALID_LOGIN_MESSAGE);
}

#[tokio::test]
async fn authenticate_maps_connection_failure_to_service_unavailable() {
    let mut repo = MockAccountRepository::new();
    repo.expect_find_credentials()
        .return_once(|_| Err(AccountPersistenceError::connection("refused")));
    let hasher = MockPasswordHasher::new();

    let err = service(repo, hasher)
        .authenticate(&credentials("s3cret"))
        .await
        .expect_err("pool down");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    assert_eq!(err.message(), DATABASE_UNAVAILABLE_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn register_failures_do_not_echo_database_text(form: SignupForm) {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .return_once(|_| Ok(PasswordDigest::new("$2b$10$digest")));
    let mut repo = MockAccountRepository::new();
    repo.expect_create_account()
        .return_once(|_| Err(AccountPersistenceError::query("relation \"user_profile\" does not exist")));

    let err = service(repo, hasher)
        .register(form)
        .await
        .expect_err("query failure");
    assert_eq!(err.code(), ErrorCode::InternalError);
    assert!(!err.message().contains("user_profile"));
}

//! Account API handlers.
//!
//! ```text
//! POST /signup {"username":"juan","email":"juan@example.com","password":"...",
//!               "firstname":"Juan","lastname":"Dela Cruz","age":42,
//!               "gender":"male","mobilenumber":"09171234567"}
//! POST /login  {"username":"juan","password":"..."}
//! ```

use std::fmt;

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use zeroize::Zeroizing;

use crate::domain::{
    AuthenticatedUser, Error, LoginCredentials, LoginValidationError, SignupDraft, SignupForm,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, account_validation_error, missing_field_error, parse_optional_i32, require_text,
};

/// Message returned after a successful signup.
pub const SIGNUP_MESSAGE: &str = "User registered successfully";
/// Message returned after a successful login.
pub const LOGIN_MESSAGE: &str = "Login successful";

/// Signup request body for `POST /signup`.
///
/// Fields are optional at the transport level so missing values are reported
/// with the field name rather than as a generic JSON error. `age` accepts a
/// number, a numeric string, an empty string or `null`.
#[derive(Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SignupRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    #[schema(value_type = Option<i32>, example = 42)]
    pub age: Option<Value>,
    pub gender: Option<String>,
    #[schema(example = "09171234567")]
    pub mobilenumber: Option<String>,
}

fn redacted(value: Option<&String>) -> Option<&'static str> {
    value.map(|_| "<redacted>")
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &redacted(self.password.as_ref()))
            .field("firstname", &self.firstname)
            .field("lastname", &self.lastname)
            .field("age", &self.age)
            .field("gender", &self.gender)
            .field("mobilenumber", &self.mobilenumber)
            .finish()
    }
}

impl TryFrom<SignupRequest> for SignupForm {
    type Error = Error;

    fn try_from(value: SignupRequest) -> Result<Self, Self::Error> {
        let draft = SignupDraft {
            username: require_text(value.username, FieldName::new("username"))?,
            email: require_text(value.email, FieldName::new("email"))?,
            password: Zeroizing::new(
                value
                    .password
                    .filter(|password| !password.is_empty())
                    .ok_or_else(|| missing_field_error(FieldName::new("password")))?,
            ),
            firstname: require_text(value.firstname, FieldName::new("firstname"))?,
            lastname: require_text(value.lastname, FieldName::new("lastname"))?,
            age: parse_optional_i32(value.age, FieldName::new("age"))?,
            gender: require_text(value.gender, FieldName::new("gender"))?,
            mobile_number: require_text(value.mobilenumber, FieldName::new("mobilenumber"))?,
        };
        SignupForm::try_from(draft).map_err(|err| account_validation_error(&err))
    }
}

/// Body returned by `POST /signup`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SignupResponse {
    #[schema(example = "User registered successfully")]
    pub message: String,
    #[serde(rename = "userId")]
    #[schema(example = 7)]
    pub user_id: i32,
}

/// Register a user and its profile.
#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created", body = SignupResponse),
        (status = 400, description = "Invalid request or duplicate user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "signup"
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let form = SignupForm::try_from(payload.into_inner())?;
    let user_id = state.signup.register(form).await?;
    Ok(HttpResponse::Created().json(SignupResponse {
        message: SIGNUP_MESSAGE.to_owned(),
        user_id: user_id.get(),
    }))
}

/// Login request body for `POST /login`.
#[derive(Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &redacted(self.password.as_ref()))
            .finish()
    }
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = Error;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        let username = value
            .username
            .ok_or_else(|| missing_field_error(FieldName::new("username")))?;
        let password = Zeroizing::new(
            value
                .password
                .ok_or_else(|| missing_field_error(FieldName::new("password")))?,
        );
        Self::try_from_parts(&username, &password).map_err(map_login_validation_error)
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => missing_field_error(FieldName::new("username")),
        LoginValidationError::EmptyPassword => missing_field_error(FieldName::new("password")),
    }
}

/// User summary included in the login response.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LoginUser {
    #[schema(example = 7)]
    pub id: i32,
    #[schema(example = "juan")]
    pub username: String,
}

impl From<AuthenticatedUser> for LoginUser {
    fn from(value: AuthenticatedUser) -> Self {
        Self {
            id: value.id.get(),
            username: value.username.as_ref().to_owned(),
        }
    }
}

/// Body returned by `POST /login`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LoginResponse {
    #[schema(example = "Login successful")]
    pub message: String,
    pub user: LoginUser,
}

/// Verify a username and password.
///
/// Unknown usernames and wrong passwords produce the same response.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Invalid request or credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials = LoginCredentials::try_from(payload.into_inner())?;
    let user = state.login.authenticate(&credentials).await?;
    Ok(web::Json(LoginResponse {
        message: LOGIN_MESSAGE.to_owned(),
        user: LoginUser::from(user),
    }))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{INVALID_LOGIN_MESSAGE, MockLoginService, MockSignupCommand};
    use crate::domain::{DUPLICATE_USER_MESSAGE, UserId, Username};
    use crate::inbound::http::test_utils::{HttpStateBuilder, json_config};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::{fixture, rstest};
    use serde_json::json;

    fn details_field(body: &Value) -> Option<&str> {
        body.get("details")
            .and_then(|details| details.get("field"))
            .and_then(Value::as_str)
    }

    #[fixture]
    fn signup_body() -> Value {
        json!({
            "username": "juan",
            "email": "juan@example.com",
            "password": "s3cret",
            "firstname": "Juan",
            "lastname": "Dela Cruz",
            "age": "42",
            "gender": "male",
            "mobilenumber": "09171234567"
        })
    }

    #[rstest]
    fn request_debug_output_hides_passwords(signup_body: Value) {
        let signup_request: SignupRequest = serde_json::from_value(signup_body).expect("signup body");
        let rendered = format!("{signup_request:?}");
        assert!(rendered.contains("juan@example.com"));
        assert!(!rendered.contains("s3cret"));

        let login_request: LoginRequest =
            serde_json::from_value(json!({"username": "juan", "password": "s3cret"}))
                .expect("login body");
        assert!(!format!("{login_request:?}").contains("s3cret"));
    }

    async fn post_json(state: HttpState, uri: &str, body: Value) -> (StatusCode, Value) {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .app_data(json_config())
                .service(signup)
                .service(login),
        )
        .await;
        let request = actix_test::TestRequest::post()
            .uri(uri)
            .set_json(&body)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        let status = response.status();
        let bytes = actix_test::read_body(response).await;
        let value = serde_json::from_slice(&bytes).expect("json body");
        (status, value)
    }

    #[rstest]
    #[actix_web::test]
    async fn signup_returns_created_with_user_id(signup_body: Value) {
        let mut signup_command = MockSignupCommand::new();
        signup_command
            .expect_register()
            .withf(|form| form.username().as_ref() == "juan" && form.profile().age() == Some(42))
            .times(1)
            .return_once(|_| Ok(UserId::new(7)));
        let state = HttpStateBuilder::default().signup(signup_command).build();

        let (status, body) = post_json(state, "/signup", signup_body).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!({ "message": SIGNUP_MESSAGE, "userId": 7 }));
    }

    #[rstest]
    #[case("username")]
    #[case("email")]
    #[case("password")]
    #[case("firstname")]
    #[case("lastname")]
    #[case("gender")]
    #[case("mobilenumber")]
    #[actix_web::test]
    async fn signup_rejects_missing_fields_without_calling_service(
        mut signup_body: Value,
        #[case] field: &str,
    ) {
        signup_body
            .as_object_mut()
            .expect("object body")
            .remove(field);
        let mut signup_command = MockSignupCommand::new();
        signup_command.expect_register().times(0);
        let state = HttpStateBuilder::default().signup(signup_command).build();

        let (status, body) = post_json(state, "/signup", signup_body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.get("code"), Some(&json!("invalid_request")));
        assert_eq!(details_field(&body), Some(field));
    }

    #[rstest]
    #[actix_web::test]
    async fn signup_accepts_blank_age(mut signup_body: Value) {
        signup_body["age"] = json!("");
        let mut signup_command = MockSignupCommand::new();
        signup_command
            .expect_register()
            .withf(|form| form.profile().age().is_none())
            .return_once(|_| Ok(UserId::new(8)));
        let state = HttpStateBuilder::default().signup(signup_command).build();

        let (status, _) = post_json(state, "/signup", signup_body).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[rstest]
    #[actix_web::test]
    async fn signup_rejects_non_numeric_age(mut signup_body: Value) {
        signup_body["age"] = json!("forty");
        let state = HttpStateBuilder::default().build();

        let (status, body) = post_json(state, "/signup", signup_body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(details_field(&body), Some("age"));
    }

    #[rstest]
    #[actix_web::test]
    async fn signup_surfaces_duplicate_user(signup_body: Value) {
        let mut signup_command = MockSignupCommand::new();
        signup_command
            .expect_register()
            .return_once(|_| Err(Error::duplicate_user(DUPLICATE_USER_MESSAGE)));
        let state = HttpStateBuilder::default().signup(signup_command).build();

        let (status, body) = post_json(state, "/signup", signup_body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.get("code"), Some(&json!("duplicate_user")));
        assert_eq!(body.get("message"), Some(&json!(DUPLICATE_USER_MESSAGE)));
    }

    #[actix_web::test]
    async fn login_returns_user_summary() {
        let mut login_service = MockLoginService::new();
        login_service
            .expect_authenticate()
            .withf(|creds| creds.username() == "juan" && creds.password() == "s3cret")
            .return_once(|_| {
                Ok(AuthenticatedUser {
                    id: UserId::new(7),
                    username: Username::new("juan").expect("valid username"),
                })
            });
        let state = HttpStateBuilder::default().login(login_service).build();

        let (status, body) = post_json(
            state,
            "/login",
            json!({ "username": " juan ", "password": "s3cret" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "message": LOGIN_MESSAGE, "user": { "id": 7, "username": "juan" } })
        );
    }

    #[rstest]
    #[case(json!({ "password": "x" }), "username")]
    #[case(json!({ "username": "   ", "password": "x" }), "username")]
    #[case(json!({ "username": "juan" }), "password")]
    #[case(json!({ "username": "juan", "password": "" }), "password")]
    #[actix_web::test]
    async fn login_rejects_missing_fields(#[case] payload: Value, #[case] field: &str) {
        let mut login_service = MockLoginService::new();
        login_service.expect_authenticate().times(0);
        let state = HttpStateBuilder::default().login(login_service).build();

        let (status, body) = post_json(state, "/login", payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(details_field(&body), Some(field));
    }

    #[actix_web::test]
    async fn login_failure_is_generic() {
        let mut login_service = MockLoginService::new();
        login_service
            .expect_authenticate()
            .return_once(|_| Err(Error::invalid_credentials(INVALID_LOGIN_MESSAGE)));
        let state = HttpStateBuilder::default().login(login_service).build();

        let (status, body) = post_json(
            state,
            "/login",
            json!({ "username": "juan", "password": "wrong" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.get("code"), Some(&json!("invalid_credentials")));
        assert_eq!(body.get("message"), Some(&json!(INVALID_LOGIN_MESSAGE)));
    }

    #[actix_web::test]
    async fn malformed_json_is_an_invalid_request() {
        let state = HttpStateBuilder::default().build();
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .app_data(json_config())
                .service(login),
        )
        .await;
        let request = actix_test::TestRequest::post()
            .uri("/login")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"username\": ")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.get("code"), Some(&json!("invalid_request")));
    }
}

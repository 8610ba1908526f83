//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the wrapper schemas ([`ErrorSchema`], [`ErrorCodeSchema`],
//! [`PredictionSchema`]) that describe domain types without coupling them to
//! utoipa.
//!
//! The generated document is served by Swagger UI in debug builds and
//! exported via `cargo run --bin openapi-dump` for client tooling.

use crate::inbound::http::accounts::{
    LoginRequest, LoginResponse, LoginUser, SignupRequest, SignupResponse,
};
use crate::inbound::http::health::ServiceStatus;
use crate::inbound::http::predictions::{PredictRequest, PredictResponse};
use crate::inbound::http::scans::{ScanRequest, ScanResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, PredictionSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leafscan API",
        description = "Account, scan history and rice leaf disease detection endpoints for the mobile app."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::status,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::accounts::signup,
        crate::inbound::http::accounts::login,
        crate::inbound::http::scans::record_scan,
        crate::inbound::http::predictions::predict,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        PredictionSchema,
        ServiceStatus,
        SignupRequest,
        SignupResponse,
        LoginRequest,
        LoginResponse,
        LoginUser,
        ScanRequest,
        ScanResponse,
        PredictRequest,
        PredictResponse,
    )),
    tags(
        (name = "health", description = "Status and health probes"),
        (name = "accounts", description = "Signup and login"),
        (name = "scans", description = "Scan history"),
        (name = "predictions", description = "Leaf disease detection")
    )
)]
pub struct ApiDoc;

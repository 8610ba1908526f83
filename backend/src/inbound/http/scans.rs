//! Scan API handler.
//!
//! ```text
//! POST /scan {"user_profile_id":3,"disease_prediction":"Leaf Blast",
//!             "disease_prediction_score":0.91}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Error, NewLeafScan, UserProfileId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_required_f64, parse_required_i32, require_text, scan_validation_error,
};

/// Message returned after a scan is stored.
pub const SCAN_SAVED_MESSAGE: &str = "Scan data saved successfully";

/// Scan request body for `POST /scan`.
///
/// Numeric fields accept JSON numbers or numeric strings. A score of `0` is
/// a valid score, not a missing one.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ScanRequest {
    #[schema(value_type = i32, example = 3)]
    pub user_profile_id: Option<Value>,
    #[schema(example = "Leaf Blast")]
    pub disease_prediction: Option<String>,
    #[schema(value_type = f64, example = 0.91)]
    pub disease_prediction_score: Option<Value>,
}

impl TryFrom<ScanRequest> for NewLeafScan {
    type Error = Error;

    fn try_from(value: ScanRequest) -> Result<Self, Self::Error> {
        let user_profile_id =
            parse_required_i32(value.user_profile_id, FieldName::new("user_profile_id"))?;
        let label = require_text(
            value.disease_prediction,
            FieldName::new("disease_prediction"),
        )?;
        let score = parse_required_f64(
            value.disease_prediction_score,
            FieldName::new("disease_prediction_score"),
        )?;
        Self::try_from_parts(UserProfileId::new(user_profile_id), &label, score)
            .map_err(|err| scan_validation_error(&err))
    }
}

/// Body returned by `POST /scan`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ScanResponse {
    #[schema(example = "Scan data saved successfully")]
    pub message: String,
    #[schema(example = 42)]
    pub rice_leaf_scan_id: i32,
}

/// Store a scan result and its history entry.
#[utoipa::path(
    post,
    path = "/scan",
    request_body = ScanRequest,
    responses(
        (status = 201, description = "Scan stored", body = ScanResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["scans"],
    operation_id = "recordScan"
)]
#[post("/scan")]
pub async fn record_scan(
    state: web::Data<HttpState>,
    payload: web::Json<ScanRequest>,
) -> ApiResult<HttpResponse> {
    let scan = NewLeafScan::try_from(payload.into_inner())?;
    let recorded = state.scans.record_scan(scan).await?;
    Ok(HttpResponse::Created().json(ScanResponse {
        message: SCAN_SAVED_MESSAGE.to_owned(),
        rice_leaf_scan_id: recorded.rice_leaf_scan_id.get(),
    }))
}

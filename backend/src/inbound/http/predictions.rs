//! Prediction API handler.
//!
//! ```text
//! POST /predict {"image":"data:image/jpeg;base64,/9j/4AAQ..."}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{EncodedImage, Prediction};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, PredictionSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error};

/// Prediction request body for `POST /predict`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct PredictRequest {
    /// Base64 image, optionally prefixed with a `data:<mime>;base64,` header.
    #[schema(example = "data:image/png;base64,iVBORw0KGgo...")]
    pub image: Option<String>,
}

/// Body returned by `POST /predict`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PredictResponse {
    #[schema(example = "success")]
    pub status: String,
    #[schema(value_type = Vec<PredictionSchema>)]
    pub predictions: Vec<Prediction>,
}

/// Run disease detection on an image.
///
/// Stateless: nothing is stored. Clients record a chosen result through
/// `POST /scan`.
#[utoipa::path(
    post,
    path = "/predict",
    request_body = PredictRequest,
    responses(
        (status = 200, description = "Detections, possibly empty", body = PredictResponse),
        (status = 400, description = "Missing or undecodable image", body = ErrorSchema),
        (status = 500, description = "Detector failed", body = ErrorSchema),
        (status = 504, description = "Detector timed out", body = ErrorSchema)
    ),
    tags = ["predictions"],
    operation_id = "predict"
)]
#[post("/predict")]
pub async fn predict(
    state: web::Data<HttpState>,
    payload: web::Json<PredictRequest>,
) -> ApiResult<web::Json<PredictResponse>> {
    let image = payload
        .into_inner()
        .image
        .and_then(EncodedImage::new)
        .ok_or_else(|| missing_field_error(FieldName::new("image")))?;
    let predictions = state.predictions.predict(image).await?;
    Ok(web::Json(PredictResponse {
        status: "success".to_owned(),
        predictions,
    }))
}

//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The submitted image could not be decoded.
    #[schema(rename = "invalid_image")]
    InvalidImage,
    /// The username or email is already registered.
    #[schema(rename = "duplicate_user")]
    DuplicateUser,
    /// Username and password did not match.
    #[schema(rename = "invalid_credentials")]
    InvalidCredentials,
    /// The database is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// The detector exceeded its deadline.
    #[schema(rename = "timeout")]
    Timeout,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "missing required field: username")]
    message: String,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[schema(rename = "traceId", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details, typically `{field, code}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Prediction`].
///
/// Predictions are passed through exactly as the detector produced them;
/// the listed properties are the ones the bundled detector emits.
#[derive(ToSchema)]
#[schema(as = crate::domain::Prediction)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PredictionSchema {
    #[schema(example = 12.5)]
    xmin: Option<f64>,
    #[schema(example = 30.0)]
    ymin: Option<f64>,
    #[schema(example = 220.0)]
    xmax: Option<f64>,
    #[schema(example = 310.25)]
    ymax: Option<f64>,
    /// Detection confidence between 0 and 1.
    #[schema(example = 0.87)]
    confidence: Option<f64>,
    /// Numeric class index.
    class: Option<i64>,
    /// Disease label.
    #[schema(example = "Leaf Blast")]
    class_name: Option<String>,
    /// Advisory description of the disease.
    description: Option<String>,
    /// Suggested treatments.
    treatments: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn error_code_schema_lists_every_code() {
        assert_eq!(ErrorCodeSchema::name(), "crate.domain.ErrorCode");
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        for code in [
            "invalid_request",
            "invalid_image",
            "duplicate_user",
            "invalid_credentials",
            "service_unavailable",
            "timeout",
            "internal_error",
        ] {
            assert!(schema_json.contains(code), "missing {code}");
        }
    }

    #[test]
    fn error_schema_uses_wire_field_names() {
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        let schema_json = schema_to_json::<ErrorSchema>();
        assert!(schema_json.contains("traceId"));
        assert!(schema_json.contains("details"));
    }

    #[test]
    fn prediction_schema_has_detector_fields() {
        let schema_json = schema_to_json::<PredictionSchema>();
        assert!(schema_json.contains("class_name"));
        assert!(schema_json.contains("confidence"));
    }
}

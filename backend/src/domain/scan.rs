//! Rice-leaf scan results submitted after a prediction.
//!
//! A scan is persisted as a `rice_leaf_scan` row plus a `scan_history` row
//! referencing it. The profile reference is stored as given; its existence
//! is not checked.

use std::fmt;

use serde::Serialize;

/// Maximum length of a disease label.
pub const DISEASE_LABEL_MAX: usize = 255;

/// Validation errors raised by [`NewLeafScan::try_from_parts`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanValidationError {
    /// The disease label was empty once trimmed.
    #[error("disease_prediction must not be empty")]
    EmptyLabel,
    /// The disease label exceeded [`DISEASE_LABEL_MAX`] characters.
    #[error("disease_prediction must be at most {max} characters")]
    LabelTooLong { max: usize },
    /// The confidence score was NaN or infinite.
    #[error("disease_prediction_score must be a finite number")]
    NonFiniteScore,
}

impl ScanValidationError {
    /// Name of the offending request field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyLabel | Self::LabelTooLong { .. } => "disease_prediction",
            Self::NonFiniteScore => "disease_prediction_score",
        }
    }
}

macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wrap a raw identifier.
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Raw integer value.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

integer_id! {
    /// Reference to a `user_profile` row supplied by the caller.
    UserProfileId
}

integer_id! {
    /// Identifier generated for a `rice_leaf_scan` row.
    ScanId
}

integer_id! {
    /// Identifier generated for a `scan_history` row.
    ScanHistoryId
}

/// Validated scan submission.
///
/// ## Invariants
/// - `disease_prediction` is trimmed and non-empty.
/// - `disease_prediction_score` is finite. Zero is a valid score.
///
/// # Examples
/// ```
/// use leafscan::domain::{NewLeafScan, UserProfileId};
///
/// let scan = NewLeafScan::try_from_parts(UserProfileId::new(3), "Leaf Blast", 0.91).unwrap();
/// assert_eq!(scan.disease_prediction(), "Leaf Blast");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NewLeafScan {
    user_profile_id: UserProfileId,
    disease_prediction: String,
    disease_prediction_score: f64,
}

impl NewLeafScan {
    /// Validate raw scan fields.
    pub fn try_from_parts(
        user_profile_id: UserProfileId,
        disease_prediction: &str,
        disease_prediction_score: f64,
    ) -> Result<Self, ScanValidationError> {
        let label = disease_prediction.trim();
        if label.is_empty() {
            return Err(ScanValidationError::EmptyLabel);
        }
        if label.chars().count() > DISEASE_LABEL_MAX {
            return Err(ScanValidationError::LabelTooLong {
                max: DISEASE_LABEL_MAX,
            });
        }
        if !disease_prediction_score.is_finite() {
            return Err(ScanValidationError::NonFiniteScore);
        }
        Ok(Self {
            user_profile_id,
            disease_prediction: label.to_owned(),
            disease_prediction_score,
        })
    }

    /// Profile the scan belongs to.
    pub fn user_profile_id(&self) -> UserProfileId {
        self.user_profile_id
    }

    /// Predicted disease label.
    pub fn disease_prediction(&self) -> &str {
        &self.disease_prediction
    }

    /// Confidence of the prediction.
    pub fn disease_prediction_score(&self) -> f64 {
        self.disease_prediction_score
    }
}

/// Identifiers generated by a successful scan write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedScan {
    pub rice_leaf_scan_id: ScanId,
    pub scan_history_id: ScanHistoryId,
}

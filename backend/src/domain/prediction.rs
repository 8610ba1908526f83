//! Images submitted for detection and the predictions returned for them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Base64 image payload as received from a client, optionally carrying a
/// `data:<mime>;base64,` prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage(String);

impl EncodedImage {
    /// Wrap a payload. Returns `None` when it is blank.
    pub fn new(payload: impl Into<String>) -> Option<Self> {
        let payload = payload.into();
        if payload.trim().is_empty() {
            None
        } else {
            Some(Self(payload))
        }
    }

    /// Payload text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// PNG-encoded image bytes in the format the detector reads from stdin.
#[derive(Clone, PartialEq, Eq)]
pub struct NormalizedImage(Vec<u8>);

impl NormalizedImage {
    /// Wrap PNG bytes produced by an image normaliser.
    pub fn from_png_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Size of the encoded image in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the encoded image is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for NormalizedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NormalizedImage")
            .field("len", &self.0.len())
            .finish()
    }
}

/// Axis-aligned bounding box in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

/// One detection reported by the detector.
///
/// The detector's JSON object is kept as-is so clients receive exactly what
/// it produced (label, confidence, geometry and any advisory text such as
/// disease descriptions or treatments). Accessors read the common fields.
///
/// # Examples
/// ```
/// use leafscan::domain::Prediction;
/// use serde_json::json;
///
/// let prediction: Prediction = serde_json::from_value(json!({
///     "class_name": "Leaf Blast",
///     "confidence": 0.87,
///     "xmin": 1.0, "ymin": 2.0, "xmax": 30.0, "ymax": 40.0
/// })).unwrap();
/// assert_eq!(prediction.label(), Some("Leaf Blast"));
/// assert_eq!(prediction.confidence(), Some(0.87));
/// assert!(prediction.bounding_box().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Prediction(Map<String, Value>);

impl Prediction {
    /// Disease label (`class_name`, falling back to `label`).
    pub fn label(&self) -> Option<&str> {
        self.0
            .get("class_name")
            .or_else(|| self.0.get("label"))
            .and_then(Value::as_str)
    }

    /// Detection confidence.
    pub fn confidence(&self) -> Option<f64> {
        self.0.get("confidence").and_then(Value::as_f64)
    }

    /// Bounding box, when all four corners are numeric.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let coord = |key: &str| self.0.get(key).and_then(Value::as_f64);
        Some(BoundingBox {
            xmin: coord("xmin")?,
            ymin: coord("ymin")?,
            xmax: coord("xmax")?,
            ymax: coord("ymax")?,
        })
    }

    /// Raw JSON fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Prediction {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

//! Cross-cutting, shared constants.
//!
//! # Sentinel Confidence
//!
//! [`DEFAULT_NO_SIGNATURE_CONFIDENCE`] is reported when the model proposes no
//! signature region at all. It is a configured constant, not a measured
//! probability: consumers must not read it as "90% sure there is no signature".

/// Confidence reported for a target on which the model proposed no region.
pub const DEFAULT_NO_SIGNATURE_CONFIDENCE: f32 = 0.9;

/// Upper bound on decoded image size, in pixels.
pub const DEFAULT_MAX_IMAGE_PIXELS: u64 = 933_120_000;

/// Default location of the trained model artifact.
pub const DEFAULT_MODEL_FILE: &str = "./model.onnx";

/// Extension of the encoding the inference engine consumes natively.
pub const NATIVE_EXTENSION: &str = "jpg";

/// Notification subject for acquisition failures.
pub const ACQUISITION_ERROR_SUBJECT: &str = "Handwritten signature detection acquisition error";

/// Notification subject for model construction / inference failures.
pub const MODEL_ERROR_SUBJECT: &str = "Handwritten signature detection model error";

/// Response header carrying the gateway's status for the request.
pub const SIGDETECT_STATUS_HEADER: &str = "x-sigdetect-status";

/// Validates that a confidence value lies in `[0, 1]`.
pub fn is_probability(value: f32) -> bool {
    (0.0..=1.0).contains(&value)
}

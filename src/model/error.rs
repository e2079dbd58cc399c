use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("signature model not found at path: {path}")]
    ModelNotFound { path: PathBuf },

    #[error("failed to load signature model: {reason}")]
    ModelLoadFailed { reason: String },

    #[error("{device} device unavailable: {reason}")]
    DeviceUnavailable { device: String, reason: String },

    #[error("inference backend unavailable: {reason}")]
    BackendUnavailable { reason: String },

    #[error("signature inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("failed to decode image {path}: {reason}")]
    ImageDecodeFailed { path: PathBuf, reason: String },

    #[error("image {path} has {pixels} pixels, limit is {max}")]
    ImageTooLarge {
        path: PathBuf,
        pixels: u64,
        max: u64,
    },

    #[error("invalid model configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl From<candle_core::Error> for EngineError {
    fn from(err: candle_core::Error) -> Self {
        EngineError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::ModelLoadFailed {
            reason: err.to_string(),
        }
    }
}

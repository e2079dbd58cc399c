//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside valid range (1-65535).
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Bind address string could not be parsed.
    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// A setting required by the selected provider was not set.
    #[error("missing required environment variable: {name}")]
    MissingEnvVar { name: &'static str },

    /// An enumerated setting had an unknown value.
    #[error("invalid value '{value}' for {name}")]
    InvalidChoice { name: &'static str, value: String },

    /// A numeric setting could not be parsed.
    #[error("invalid number '{value}' for {name}")]
    InvalidNumber { name: &'static str, value: String },

    /// The no-signature sentinel is not a probability.
    #[error("invalid no-signature confidence {value}: must be between 0.0 and 1.0")]
    InvalidConfidence { value: f32 },

    /// The decoded-image pixel limit would reject every image.
    #[error("max image pixels must be greater than zero")]
    InvalidPixelLimit,

    /// A real model was requested from a build without an inference backend.
    #[error("model inference requires the `onnx` feature; rebuild with it or set SIGDETECT_STUB_MODEL=true")]
    BackendUnavailable,

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a file (when a file was expected).
    #[error("path is not a file: {path}")]
    NotAFile { path: PathBuf },

    /// Path exists but is not a directory (when a directory was expected).
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    /// The target's extension is outside the allow-set. Caller input error.
    #[error("file type is not allowed: {extension}. Must be a png or jpg file")]
    Unsupported { extension: String },

    /// Re-encoding to the engine's native format failed.
    #[error("failed to convert {path} to jpg: {reason}")]
    Conversion { path: PathBuf, reason: String },
}

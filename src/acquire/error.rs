use std::path::PathBuf;
use thiserror::Error;

use crate::aws::CliError;

#[derive(Error, Debug)]
pub enum AcquireError {
    #[error("invalid target reference '{reference}': {reason}")]
    InvalidReference { reference: String, reason: String },

    #[error("object not found: {key}")]
    NotFound { key: String },

    #[error("key escapes the storage root: {key}")]
    KeyOutsideRoot { key: String },

    #[error("download failed: {0}")]
    Cli(#[from] CliError),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type AcquireResult<T> = Result<T, AcquireError>;

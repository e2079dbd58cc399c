use thiserror::Error;

use crate::constants::{ACQUISITION_ERROR_SUBJECT, MODEL_ERROR_SUBJECT};
use crate::format::FormatError;
use crate::model::EngineError;

/// Typed failure surfaced to the caller. Any of these aborts the batch.
#[derive(Debug, Error)]
pub enum DetectionError {
    /// Extension outside the allow-set. Caller error, not reported.
    #[error("file type is not allowed: {extension}. Must be a png or jpg file")]
    InputFormat { extension: String },

    #[error("failed to acquire {target}: {reason}")]
    Acquisition { target: String, reason: String },

    /// Model construction, conversion or inference failure.
    #[error("failed to apply signature model: {reason}")]
    ModelApplication { reason: String },

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
}

/// A classified failure as delivered to the notification channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub category: &'static str,
    pub subject: &'static str,
    pub message: String,
}

impl DetectionError {
    pub fn category(&self) -> &'static str {
        match self {
            Self::InputFormat { .. } => "input_format",
            Self::Acquisition { .. } => "acquisition",
            Self::ModelApplication { .. } => "model_application",
            Self::InvalidInput { .. } => "invalid_input",
        }
    }

    /// Report for the notification channel, `None` for caller errors.
    pub fn report(&self) -> Option<ErrorReport> {
        let subject = match self {
            Self::Acquisition { .. } => ACQUISITION_ERROR_SUBJECT,
            Self::ModelApplication { .. } => MODEL_ERROR_SUBJECT,
            Self::InputFormat { .. } | Self::InvalidInput { .. } => return None,
        };

        Some(ErrorReport {
            category: self.category(),
            subject,
            message: format!("Error executing detection: {}", self),
        })
    }
}

impl From<FormatError> for DetectionError {
    fn from(err: FormatError) -> Self {
        match err {
            FormatError::Unsupported { extension } => Self::InputFormat { extension },
            conversion @ FormatError::Conversion { .. } => Self::ModelApplication {
                reason: conversion.to_string(),
            },
        }
    }
}

impl From<EngineError> for DetectionError {
    fn from(err: EngineError) -> Self {
        Self::ModelApplication {
            reason: err.to_string(),
        }
    }
}

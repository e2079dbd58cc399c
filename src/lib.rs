//! Handwritten signature detection over batches of document images.
//!
//! # Public API Surface
//!
//! ## Core Types
//! - [`Config`], [`ConfigError`] - Service configuration
//! - [`Batch`], [`Document`], [`Target`] - Invocation input
//! - [`Report`], [`Outcome`] - Invocation output
//! - [`BatchOrchestrator`] - Runs a batch end to end
//! - [`DetectionError`] - Typed failure returned to callers
//!
//! ## Inference
//! - [`EngineHandle`] - Lazily-loaded, shared signature model
//! - [`SignatureModel`], [`ModelLoader`] - Backend seams
//!
//! ## Collaborators
//! - [`ImageAcquirer`] - Resolves target references to local files
//! - [`Reporter`] - Best-effort failure notification
//!
//! ## Constants
//! [`DEFAULT_NO_SIGNATURE_CONFIDENCE`] is a configured sentinel, not a measured
//! probability. See [`constants`].

pub mod acquire;
pub mod aws;
pub mod config;
pub mod constants;
pub mod detection;
pub mod format;
pub mod gateway;
pub mod model;
pub mod notify;

pub use acquire::{
    AcquireError, AcquireResult, ImageAcquirer, LocalAcquirer, S3Acquirer, TargetRef,
    build_acquirer,
};
pub use config::{Config, ConfigError, NotifierKind, StorageProvider};
pub use constants::{
    ACQUISITION_ERROR_SUBJECT, DEFAULT_NO_SIGNATURE_CONFIDENCE, MODEL_ERROR_SUBJECT,
    SIGDETECT_STATUS_HEADER,
};
pub use detection::{
    Batch, BatchOrchestrator, DetectionError, Document, ErrorReport, Outcome, Report, ScanTarget,
    Target, TargetScanner, evaluate_document,
};
pub use format::{FormatError, ImageKind, check_extension};
pub use model::{
    ConfiguredLoader, DetectionVerdict, Detections, EngineError, EngineHandle, ModelConfig,
    ModelInput, ModelLoader, RegionProposal, SignatureModel, StubModel,
};
pub use notify::{LogReporter, NotifyError, Reporter, SnsReporter, WebhookReporter, build_reporter};

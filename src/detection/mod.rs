//! Detection orchestration.
//!
//! [`BatchOrchestrator`] walks documents in order, [`evaluate_document`] applies
//! the first-positive short-circuit over a document's targets, and
//! [`TargetScanner`] runs the acquire / format gate / inference chain for one
//! target, classifying and reporting failures where they happen.

pub mod error;
pub mod evaluator;
pub mod orchestrator;
pub mod scanner;
pub mod types;


pub use error::{DetectionError, ErrorReport};
pub use evaluator::evaluate_document;
pub use orchestrator::{BatchOrchestrator, validate_batch};
pub use scanner::{ScanTarget, TargetScanner};
pub use types::{Batch, Document, Outcome, Report, Target};

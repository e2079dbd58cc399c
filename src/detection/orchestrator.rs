use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;
use tracing::{Span, debug, field, info, instrument};
use uuid::Uuid;

use crate::acquire::{ImageAcquirer, build_acquirer};
use crate::config::Config;
use crate::model::EngineHandle;
use crate::notify::{Reporter, build_reporter};

use super::error::DetectionError;
use super::evaluator::evaluate_document;
use super::scanner::{ScanTarget, TargetScanner};
use super::types::{Batch, Outcome, Report};

/// Runs whole batches. Cheap to share: clone the `Arc` it lives in.
///
/// Each run works in its own directory under the configured scratch root,
/// removed when the run ends whether it succeeded or not.
pub struct BatchOrchestrator {
    scanner: Arc<dyn ScanTarget>,
    engine: Arc<EngineHandle>,
    scratch_root: PathBuf,
}

impl BatchOrchestrator {
    pub fn new(
        engine: Arc<EngineHandle>,
        acquirer: Arc<dyn ImageAcquirer>,
        reporter: Arc<dyn Reporter>,
        config: &Config,
    ) -> Self {
        let scanner = TargetScanner::new(engine.clone(), acquirer, reporter)
            .with_channel(config.notify_channel.clone().unwrap_or_default());

        Self {
            scanner: Arc::new(scanner),
            engine,
            scratch_root: config.scratch_dir.clone(),
        }
    }

    /// Wires the engine, acquirer and reporter selected by `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(EngineHandle::from_config(config)),
            build_acquirer(config),
            build_reporter(config),
            config,
        )
    }

    pub fn engine(&self) -> &Arc<EngineHandle> {
        &self.engine
    }

    /// Evaluates every document in order. The first failure aborts the batch.
    #[instrument(skip_all, fields(invocation_id = field::Empty, documents = batch.documents.len()))]
    pub async fn run(&self, batch: &Batch) -> Result<Report, DetectionError> {
        let invocation_id = Uuid::new_v4();
        Span::current().record("invocation_id", field::display(invocation_id));

        validate_batch(batch)?;

        let scratch = self.invocation_scratch(invocation_id).await?;
        debug!(scratch = %scratch.path().display(), "Invocation scratch directory created");

        let mut report = Report::default();
        for document in &batch.documents {
            let verdict =
                evaluate_document(self.scanner.as_ref(), document, scratch.path()).await?;
            report.documents.push(Outcome::from(verdict));
        }

        info!(
            report = %serde_json::to_string(&report).unwrap_or_default(),
            "Detection complete"
        );
        Ok(report)
    }

    async fn invocation_scratch(&self, invocation_id: Uuid) -> Result<TempDir, DetectionError> {
        let scratch_err = |e: std::io::Error| DetectionError::Acquisition {
            target: self.scratch_root.display().to_string(),
            reason: format!("cannot create scratch directory: {}", e),
        };

        tokio::fs::create_dir_all(&self.scratch_root)
            .await
            .map_err(scratch_err)?;
        tempfile::Builder::new()
            .prefix(&format!("{}-", invocation_id))
            .tempdir_in(&self.scratch_root)
            .map_err(scratch_err)
    }
}

/// Rejects batches containing a document without targets.
pub fn validate_batch(batch: &Batch) -> Result<(), DetectionError> {
    match batch
        .documents
        .iter()
        .position(|document| document.targets.is_empty())
    {
        Some(index) => Err(DetectionError::InvalidInput {
            reason: format!("document {index} has no targets"),
        }),
        None => Ok(()),
    }
}

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::acquire::{ImageAcquirer, TargetRef};
use crate::format::{check_extension, normalize};
use crate::model::{DetectionVerdict, EngineHandle};
use crate::notify::Reporter;

use super::error::DetectionError;
use super::types::Target;

#[async_trait]
/// Produces a verdict for one target.
pub trait ScanTarget: Send + Sync {
    /// Scans `target`, keeping any files it writes inside `scratch_dir`.
    async fn scan(
        &self,
        target: &Target,
        scratch_dir: &Path,
    ) -> Result<DetectionVerdict, DetectionError>;
}

/// Acquire, format-gate and detect for a single target.
///
/// This is the classification boundary: collaborator failures become a
/// [`DetectionError`] here, and the reportable ones are sent to the
/// [`Reporter`] before being returned.
pub struct TargetScanner {
    engine: Arc<EngineHandle>,
    acquirer: Arc<dyn ImageAcquirer>,
    reporter: Arc<dyn Reporter>,
    channel: String,
}

impl TargetScanner {
    pub fn new(
        engine: Arc<EngineHandle>,
        acquirer: Arc<dyn ImageAcquirer>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            engine,
            acquirer,
            reporter,
            channel: String::new(),
        }
    }

    /// Notification channel passed to the reporter.
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = channel.into();
        self
    }

    pub fn engine(&self) -> &Arc<EngineHandle> {
        &self.engine
    }

    async fn classified(&self, err: DetectionError) -> DetectionError {
        if let Some(report) = err.report() {
            warn!(category = report.category, error = %err, "Reporting detection failure");
            self.reporter
                .notify(&self.channel, report.subject, &report.message)
                .await;
        }
        err
    }

    async fn scan_unreported(
        &self,
        target: &Target,
        scratch_dir: &Path,
    ) -> Result<DetectionVerdict, DetectionError> {
        let target_ref =
            TargetRef::parse(&target.path).map_err(|e| DetectionError::InvalidInput {
                reason: e.to_string(),
            })?;

        let kind = check_extension(target_ref.file_name())?;

        let acquired = self
            .acquirer
            .acquire(&target_ref, scratch_dir)
            .await
            .map_err(|e| DetectionError::Acquisition {
                target: target_ref.to_string(),
                reason: e.to_string(),
            })?;
        debug!(target = %target_ref, local = %acquired.display(), "Target acquired");

        let max_pixels = self.engine.max_image_pixels();
        let image = tokio::task::spawn_blocking(move || normalize(&acquired, kind, max_pixels))
            .await
            .map_err(|e| DetectionError::ModelApplication {
                reason: format!("Conversion task failed: {}", e),
            })??;
        let verdict = self.engine.detect(&image).await?;
        Ok(verdict)
    }
}

#[async_trait]
impl ScanTarget for TargetScanner {
    async fn scan(
        &self,
        target: &Target,
        scratch_dir: &Path,
    ) -> Result<DetectionVerdict, DetectionError> {
        match self.scan_unreported(target, scratch_dir).await {
            Ok(verdict) => Ok(verdict),
            Err(err) => Err(self.classified(err).await),
        }
    }
}

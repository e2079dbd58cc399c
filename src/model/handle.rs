use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::config::Config;

use super::config::ModelConfig;
use super::detector::{DetectionVerdict, ModelLoader, SignatureModel};
use super::error::EngineError;
use super::input::ModelInput;
use super::loader::ConfiguredLoader;

/// Shared, lazily-loaded signature model.
///
/// The first [`detect`](EngineHandle::detect) call constructs the model through the
/// [`ModelLoader`]; concurrent first calls wait on the same initialization, so the
/// loader runs once. A failed load leaves the handle empty and the next call tries
/// again. Inference itself is serialized behind a mutex.
///
/// Loading, decoding and inference run on the blocking thread pool.
pub struct EngineHandle {
    loader: Arc<dyn ModelLoader>,
    model: OnceCell<Arc<Mutex<Box<dyn SignatureModel>>>>,
    no_signature_confidence: f32,
    max_image_pixels: u64,
}

impl std::fmt::Debug for EngineHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineHandle")
            .field("loaded", &self.is_loaded())
            .field("no_signature_confidence", &self.no_signature_confidence)
            .field("max_image_pixels", &self.max_image_pixels)
            .finish()
    }
}

impl EngineHandle {
    pub fn new(
        loader: Arc<dyn ModelLoader>,
        no_signature_confidence: f32,
        max_image_pixels: u64,
    ) -> Self {
        Self {
            loader,
            model: OnceCell::new(),
            no_signature_confidence,
            max_image_pixels,
        }
    }

    /// Builds a handle around [`ConfiguredLoader`] using service configuration.
    pub fn from_config(config: &Config) -> Self {
        let loader = ConfiguredLoader::new(ModelConfig::from(config));
        Self::new(
            Arc::new(loader),
            config.no_signature_confidence,
            config.max_image_pixels,
        )
    }

    async fn model(&self) -> Result<Arc<Mutex<Box<dyn SignatureModel>>>, EngineError> {
        let model = self
            .model
            .get_or_try_init(|| async {
                info!("Loading signature model (first use)");
                let started = Instant::now();
                let loader = Arc::clone(&self.loader);
                let model = tokio::task::spawn_blocking(move || loader.load())
                    .await
                    .map_err(|e| EngineError::ModelLoadFailed {
                        reason: format!("Model load task failed: {}", e),
                    })??;
                info!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    stub = model.is_stub(),
                    "Signature model ready"
                );
                Ok::<_, EngineError>(Arc::new(Mutex::new(model)))
            })
            .await?;
        Ok(Arc::clone(model))
    }

    /// Runs the model over the image at `image_path` and reduces the result to a verdict.
    pub async fn detect(&self, image_path: &Path) -> Result<DetectionVerdict, EngineError> {
        let model = self.model().await?;

        let path = image_path.to_path_buf();
        let max_image_pixels = self.max_image_pixels;
        let detections = tokio::task::spawn_blocking(move || {
            let device = model.lock().device().clone();
            let input = ModelInput::load(&path, max_image_pixels, &device)?;
            let detections = model.lock().detect(&input)?;
            Ok::<_, EngineError>(detections)
        })
        .await
        .map_err(|e| EngineError::InferenceFailed {
            reason: format!("Inference task failed: {}", e),
        })??;
        let verdict = detections.verdict(self.no_signature_confidence);

        debug!(
            image = %image_path.display(),
            proposals = detections.proposals.len(),
            has_signature = verdict.has_signature,
            confidence = verdict.confidence,
            "Signature model verdict"
        );

        Ok(verdict)
    }

    /// Returns `true` once the model has been constructed.
    pub fn is_loaded(&self) -> bool {
        self.model.initialized()
    }

    /// Returns whether the loaded model is the stub (`None` before first use).
    pub fn is_stub(&self) -> Option<bool> {
        self.model.get().map(|model| model.lock().is_stub())
    }

    /// Largest image, in pixels, accepted for decoding or conversion.
    pub fn max_image_pixels(&self) -> u64 {
        self.max_image_pixels
    }

    /// Confidence reported for targets without any proposal.
    pub fn no_signature_confidence(&self) -> f32 {
        self.no_signature_confidence
    }
}

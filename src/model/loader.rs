use tracing::{debug, warn};

use super::config::ModelConfig;
use super::detector::{ModelLoader, SignatureModel};
use super::device::select_device;
use super::error::EngineError;
use super::stub::StubModel;

/// Loads the backend described by a [`ModelConfig`].
#[derive(Debug, Clone)]
pub struct ConfiguredLoader {
    config: ModelConfig,
}

impl ConfiguredLoader {
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }
}

impl ModelLoader for ConfiguredLoader {
    fn load(&self) -> Result<Box<dyn SignatureModel>, EngineError> {
        self.config.validate()?;

        let device = select_device()?;
        debug!(?device, "Selected compute device for signature model");

        if self.config.testing_stub {
            warn!("Signature model running in STUB mode (testing only)");
            return Ok(Box::new(StubModel::new(device)));
        }

        load_backend(&self.config, device)
    }
}

#[cfg(feature = "onnx")]
fn load_backend(
    config: &ModelConfig,
    device: candle_core::Device,
) -> Result<Box<dyn SignatureModel>, EngineError> {
    let model = super::onnx::OnnxSignatureModel::load(config, device)?;
    Ok(Box::new(model))
}

#[cfg(not(feature = "onnx"))]
fn load_backend(
    config: &ModelConfig,
    _device: candle_core::Device,
) -> Result<Box<dyn SignatureModel>, EngineError> {
    Err(EngineError::BackendUnavailable {
        reason: format!(
            "cannot load {}: built without the `onnx` feature",
            config.model_path.display()
        ),
    })
}

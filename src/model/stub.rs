use candle_core::Device;
use tracing::debug;

use super::detector::{Detections, SignatureModel};
use super::error::EngineError;
use super::input::ModelInput;

/// Stand-in model that never proposes a region. Testing and local runs only.
#[derive(Debug)]
pub struct StubModel {
    device: Device,
}

impl StubModel {
    pub fn new(device: Device) -> Self {
        Self { device }
    }
}

impl SignatureModel for StubModel {
    fn detect(&self, input: &ModelInput) -> Result<Detections, EngineError> {
        debug!(
            width = input.width(),
            height = input.height(),
            "Stub signature model: no proposals"
        );
        Ok(Detections::empty())
    }

    fn device(&self) -> &Device {
        &self.device
    }

    fn is_stub(&self) -> bool {
        true
    }
}

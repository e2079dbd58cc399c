use candle_core::Device;
use tracing::debug;

#[cfg(any(feature = "metal", feature = "cuda"))]
use tracing::{info, warn};

use super::error::EngineError;

/// Picks the device the signature model runs on.
///
/// GPU backends are tried in feature order (Metal, then CUDA). A CPU-only build
/// never touches a GPU; a GPU build that finds no usable device falls back to CPU.
pub fn select_device() -> Result<Device, EngineError> {
    #[cfg(feature = "metal")]
    match Device::new_metal(0) {
        Ok(device) => {
            info!("Signature inference on Metal GPU");
            return Ok(device);
        }
        Err(e) => warn!(error = %e, "Metal device unavailable"),
    }

    #[cfg(feature = "cuda")]
    match Device::new_cuda(0) {
        Ok(device) => {
            info!("Signature inference on CUDA GPU");
            return Ok(device);
        }
        Err(e) => warn!(error = %e, "CUDA device unavailable"),
    }

    if cfg!(any(feature = "metal", feature = "cuda")) {
        debug!("No GPU device usable, signature inference on CPU");
    } else {
        debug!("CPU-only build, signature inference on CPU");
    }
    Ok(Device::Cpu)
}

//! Signature inference engine.
//!
//! - [`EngineHandle`] owns the lazily-loaded model and turns proposals into verdicts.
//! - [`SignatureModel`] / [`ModelLoader`] are the seams a backend plugs into.
//! - The ONNX backend (`onnx` feature) evaluates an exported detection graph with
//!   `candle-onnx`; [`StubModel`] stands in when no model file is available.

pub mod config;
pub mod detector;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
pub mod handle;
pub mod input;
pub mod loader;
#[cfg(feature = "onnx")]
pub mod onnx;
pub mod stub;


pub use config::{DEFAULT_BOXES_OUTPUT, DEFAULT_SCORES_OUTPUT, ModelConfig};
pub use detector::{DetectionVerdict, Detections, ModelLoader, RegionProposal, SignatureModel};
pub use error::EngineError;
pub use handle::EngineHandle;
pub use input::{ModelInput, decode_rgb};
pub use loader::ConfiguredLoader;
#[cfg(feature = "onnx")]
pub use onnx::OnnxSignatureModel;
pub use stub::StubModel;

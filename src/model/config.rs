use std::path::PathBuf;

use crate::config::Config;
use crate::constants::DEFAULT_MODEL_FILE;
use crate::model::error::EngineError;

/// Default name of the graph output holding per-proposal confidence scores.
pub const DEFAULT_SCORES_OUTPUT: &str = "scores";

/// Default name of the graph output holding proposal boxes.
pub const DEFAULT_BOXES_OUTPUT: &str = "boxes";

#[derive(Debug, Clone)]
/// Configuration for loading the signature model.
pub struct ModelConfig {
    /// Path to the exported ONNX graph (weights embedded).
    pub model_path: PathBuf,
    /// Graph input to feed the image tensor to. `None` picks the first non-initializer input.
    pub input_name: Option<String>,
    /// Graph output holding proposal scores.
    pub scores_output: String,
    /// Graph output holding proposal boxes.
    pub boxes_output: String,
    /// If true, load a stub that never proposes a region (no model file required).
    pub testing_stub: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_FILE),
            input_name: None,
            scores_output: DEFAULT_SCORES_OUTPUT.to_string(),
            boxes_output: DEFAULT_BOXES_OUTPUT.to_string(),
            testing_stub: false,
        }
    }
}

impl From<&Config> for ModelConfig {
    fn from(config: &Config) -> Self {
        Self {
            model_path: config.model_path.clone(),
            testing_stub: config.stub_model,
            ..Default::default()
        }
    }
}

impl ModelConfig {
    /// Creates a config for a model file with default graph names.
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: model_path.into(),
            ..Default::default()
        }
    }

    /// Creates a stub config (no model file).
    pub fn stub() -> Self {
        Self {
            testing_stub: true,
            ..Default::default()
        }
    }

    /// Overrides the graph input name.
    pub fn with_input_name(mut self, name: impl Into<String>) -> Self {
        self.input_name = Some(name.into());
        self
    }

    /// Validates required fields for non-stub mode.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.testing_stub {
            return Ok(());
        }

        if self.model_path.as_os_str().is_empty() {
            return Err(EngineError::InvalidConfig {
                reason: "model_path is required (stub mode is disabled)".to_string(),
            });
        }

        if self.scores_output.is_empty() {
            return Err(EngineError::InvalidConfig {
                reason: "scores_output cannot be empty".to_string(),
            });
        }

        if !self.model_path.is_file() {
            return Err(EngineError::ModelNotFound {
                path: self.model_path.clone(),
            });
        }

        Ok(())
    }
}

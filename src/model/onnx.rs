//! ONNX region-proposal backend evaluated with `candle-onnx`.
//!
//! Expects a detection graph exported with separate `scores` (`[N]`) and
//! `boxes` (`[N, 4]`) outputs, proposals already ranked by score.

use std::collections::HashMap;

use candle_core::{DType, Device};
use candle_onnx::onnx::ModelProto;
use tracing::{debug, info};

use super::config::ModelConfig;
use super::detector::{Detections, RegionProposal, SignatureModel};
use super::error::EngineError;
use super::input::ModelInput;

pub struct OnnxSignatureModel {
    model: ModelProto,
    input_name: String,
    scores_output: String,
    boxes_output: String,
    device: Device,
}

impl std::fmt::Debug for OnnxSignatureModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxSignatureModel")
            .field("input_name", &self.input_name)
            .field("scores_output", &self.scores_output)
            .field("boxes_output", &self.boxes_output)
            .field("device", &format!("{:?}", self.device))
            .finish_non_exhaustive()
    }
}

impl OnnxSignatureModel {
    pub fn load(config: &ModelConfig, device: Device) -> Result<Self, EngineError> {
        let model = candle_onnx::read_file(&config.model_path).map_err(|e| {
            EngineError::ModelLoadFailed {
                reason: format!("Failed to read ONNX graph: {}", e),
            }
        })?;

        let graph = model
            .graph
            .as_ref()
            .ok_or_else(|| EngineError::ModelLoadFailed {
                reason: format!("{} contains no graph", config.model_path.display()),
            })?;

        let input_name = match &config.input_name {
            Some(name) => name.clone(),
            None => graph
                .input
                .iter()
                .map(|input| input.name.as_str())
                .find(|name| !graph.initializer.iter().any(|init| init.name == *name))
                .map(str::to_string)
                .ok_or_else(|| EngineError::InvalidConfig {
                    reason: "graph declares no image input".to_string(),
                })?,
        };

        if !graph
            .output
            .iter()
            .any(|output| output.name == config.scores_output)
        {
            return Err(EngineError::InvalidConfig {
                reason: format!("graph has no '{}' output", config.scores_output),
            });
        }

        info!(
            model_path = %config.model_path.display(),
            input = %input_name,
            nodes = graph.node.len(),
            "Signature model graph loaded"
        );

        Ok(Self {
            model,
            input_name,
            scores_output: config.scores_output.clone(),
            boxes_output: config.boxes_output.clone(),
            device,
        })
    }
}

impl SignatureModel for OnnxSignatureModel {
    fn detect(&self, input: &ModelInput) -> Result<Detections, EngineError> {
        let inputs = HashMap::from([(self.input_name.clone(), input.tensor().clone())]);
        let mut outputs = candle_onnx::simple_eval(&self.model, inputs)?;

        let scores = outputs
            .remove(&self.scores_output)
            .ok_or_else(|| EngineError::InferenceFailed {
                reason: format!("graph produced no '{}' output", self.scores_output),
            })?
            .flatten_all()?
            .to_dtype(DType::F32)?
            .to_vec1::<f32>()?;

        let boxes = match outputs.remove(&self.boxes_output) {
            Some(tensor) => tensor
                .to_dtype(DType::F32)?
                .reshape(((), 4))?
                .to_vec2::<f32>()?,
            None => Vec::new(),
        };

        debug!(
            proposals = scores.len(),
            top_score = scores.first().copied(),
            "Signature graph evaluated"
        );

        let proposals = scores
            .into_iter()
            .enumerate()
            .map(|(idx, score)| RegionProposal {
                bbox: boxes
                    .get(idx)
                    .and_then(|row| <[f32; 4]>::try_from(row.as_slice()).ok()),
                score,
            })
            .collect();

        Ok(Detections { proposals })
    }

    fn device(&self) -> &Device {
        &self.device
    }
}

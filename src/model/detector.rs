use candle_core::Device;
use serde::{Deserialize, Serialize};

use super::error::EngineError;
use super::input::ModelInput;

/// One region the model believes contains a handwritten signature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionProposal {
    /// Box corners in input pixel space, in the order the backend emits them.
    pub bbox: Option<[f32; 4]>,
    /// Confidence in `[0, 1]`.
    pub score: f32,
}

impl RegionProposal {
    pub fn new(score: f32) -> Self {
        Self { bbox: None, score }
    }
}

/// Proposals in the model's own ranking order (highest confidence first).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Detections {
    pub proposals: Vec<RegionProposal>,
}

impl Detections {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_scores(scores: impl IntoIterator<Item = f32>) -> Self {
        Self {
            proposals: scores.into_iter().map(RegionProposal::new).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }

    /// Reduces the proposal set to a verdict.
    ///
    /// A non-empty set reports the score of the first proposal. The model ranks its
    /// output, so the first entry is taken as-is rather than searched for a maximum.
    /// An empty set reports `no_signature_confidence`, which is a configured sentinel
    /// and not a measured probability.
    pub fn verdict(&self, no_signature_confidence: f32) -> DetectionVerdict {
        match self.proposals.first() {
            Some(top) => DetectionVerdict::signed(top.score),
            None => DetectionVerdict::unsigned(no_signature_confidence),
        }
    }
}

/// The result of testing one target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionVerdict {
    pub has_signature: bool,
    pub confidence: f32,
}

impl DetectionVerdict {
    pub fn signed(confidence: f32) -> Self {
        Self {
            has_signature: true,
            confidence,
        }
    }

    pub fn unsigned(confidence: f32) -> Self {
        Self {
            has_signature: false,
            confidence,
        }
    }
}

/// A loaded region-proposal model.
///
/// Implementations need not be safe for concurrent inference: the engine handle
/// serializes every call behind a lock.
pub trait SignatureModel: Send {
    /// Runs the model over one image.
    fn detect(&self, input: &ModelInput) -> Result<Detections, EngineError>;

    /// Device that inputs must be placed on.
    fn device(&self) -> &Device;

    /// Returns `true` for the stub backend.
    fn is_stub(&self) -> bool {
        false
    }
}

/// Constructs a [`SignatureModel`]. Called at most once per successful engine load.
pub trait ModelLoader: Send + Sync {
    fn load(&self) -> Result<Box<dyn SignatureModel>, EngineError>;
}

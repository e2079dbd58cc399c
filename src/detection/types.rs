use serde::{Deserialize, Serialize};

use crate::model::DetectionVerdict;

/// One invocation's input: documents in caller order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    #[serde(alias = "files_to_process")]
    pub documents: Vec<Document>,
}

/// Candidate images believed to show the same logical document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub targets: Vec<Target>,
}

/// Reference to one image. Unknown fields (`width`, `height`, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub path: String,
}

impl Target {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Document {
    pub fn new(paths: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            targets: paths.into_iter().map(Target::new).collect(),
        }
    }
}

impl Batch {
    pub fn new(documents: impl IntoIterator<Item = Document>) -> Self {
        Self {
            documents: documents.into_iter().collect(),
        }
    }
}

/// The verdict chosen to represent a document.
///
/// Serialized with both fields as strings (`"true"`, `"0.87"`), which is what
/// downstream consumers parse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "OutcomeWire", try_from = "OutcomeWire")]
pub struct Outcome {
    pub verdict: DetectionVerdict,
}

impl From<DetectionVerdict> for Outcome {
    fn from(verdict: DetectionVerdict) -> Self {
        Self { verdict }
    }
}

#[derive(Serialize, Deserialize)]
struct OutcomeWire {
    contains_handwritten_signature: String,
    confidence: String,
}

impl From<Outcome> for OutcomeWire {
    fn from(outcome: Outcome) -> Self {
        Self {
            contains_handwritten_signature: outcome.verdict.has_signature.to_string(),
            confidence: outcome.verdict.confidence.to_string(),
        }
    }
}

impl TryFrom<OutcomeWire> for Outcome {
    type Error = String;

    fn try_from(wire: OutcomeWire) -> Result<Self, Self::Error> {
        let has_signature = wire
            .contains_handwritten_signature
            .parse::<bool>()
            .map_err(|e| format!("contains_handwritten_signature: {e}"))?;
        let confidence = wire
            .confidence
            .parse::<f32>()
            .map_err(|e| format!("confidence: {e}"))?;

        Ok(Self {
            verdict: DetectionVerdict {
                has_signature,
                confidence,
            },
        })
    }
}

/// One outcome per document, aligned with the batch order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub documents: Vec<Outcome>,
}

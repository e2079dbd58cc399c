use std::path::Path;

use tracing::debug;

use crate::model::DetectionVerdict;

use super::error::DetectionError;
use super::scanner::ScanTarget;
use super::types::Document;

/// Picks the verdict that represents `document`.
///
/// Targets are scanned in order and the first positive verdict wins; later
/// targets are not scanned. With no positive verdict the last target's verdict
/// is returned, not an aggregate. Documents without targets are rejected.
pub async fn evaluate_document(
    scanner: &dyn ScanTarget,
    document: &Document,
    scratch_dir: &Path,
) -> Result<DetectionVerdict, DetectionError> {
    let mut last = None;

    for (index, target) in document.targets.iter().enumerate() {
        let verdict = scanner.scan(target, scratch_dir).await?;
        debug!(
            index,
            target = %target.path,
            has_signature = verdict.has_signature,
            confidence = verdict.confidence,
            "Target scanned"
        );

        if verdict.has_signature {
            return Ok(verdict);
        }
        last = Some(verdict);
    }

    last.ok_or_else(|| DetectionError::InvalidInput {
        reason: "document has no targets".to_string(),
    })
}

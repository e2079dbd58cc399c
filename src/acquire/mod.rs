//! Target acquisition: resolving a target reference to a local file.
//!
//! `S3Acquirer` shells out to `aws s3 cp`. `LocalAcquirer` copies from a
//! directory tree and doubles as the development backend.

pub mod error;
pub mod local;
pub mod s3;
pub mod target;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{Config, StorageProvider};

pub use error::{AcquireError, AcquireResult};
pub use local::LocalAcquirer;
pub use s3::S3Acquirer;
pub use target::TargetRef;

#[async_trait]
/// Resolves a target to local bytes.
///
/// Implementations must be idempotent: acquiring the same target twice yields
/// the same bytes at the same local path.
pub trait ImageAcquirer: Send + Sync {
    /// Writes the target into `scratch_dir` and returns the local path.
    async fn acquire(&self, target: &TargetRef, scratch_dir: &Path) -> AcquireResult<PathBuf>;
}

/// Builds the acquirer selected by [`Config::storage_provider`].
pub fn build_acquirer(config: &Config) -> Arc<dyn ImageAcquirer> {
    match config.storage_provider {
        StorageProvider::S3 => Arc::new(S3Acquirer::new(config.file_bucket.clone())),
        StorageProvider::Local => Arc::new(LocalAcquirer::new(config.local_root.clone())),
    }
}

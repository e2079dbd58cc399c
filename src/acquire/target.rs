use std::path::{Path, PathBuf};

use super::error::{AcquireError, AcquireResult};

/// A parsed target reference.
///
/// `s3://bucket/dir/page.png` yields key `dir/page.png` and file name `page.png`:
/// the scheme and bucket segments (everything up to the third `/`) are dropped.
/// A reference without a scheme is used as the key verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRef {
    reference: String,
    key: String,
}

impl TargetRef {
    pub fn parse(reference: &str) -> AcquireResult<Self> {
        let invalid = |reason: &str| AcquireError::InvalidReference {
            reference: reference.to_string(),
            reason: reason.to_string(),
        };

        let key = if reference.contains("://") {
            reference.split('/').skip(3).collect::<Vec<_>>().join("/")
        } else {
            reference.to_string()
        };

        if key.is_empty() {
            return Err(invalid("no object key"));
        }
        if key.ends_with('/') {
            return Err(invalid("key names a directory"));
        }

        Ok(Self {
            reference: reference.to_string(),
            key,
        })
    }

    /// The reference as given by the caller.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Object key within the storage location.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Last segment of the key.
    pub fn file_name(&self) -> &str {
        self.key.rsplit('/').next().unwrap_or(&self.key)
    }

    /// Where the acquired bytes are written inside `scratch_dir`.
    pub fn local_path(&self, scratch_dir: &Path) -> PathBuf {
        scratch_dir.join(self.file_name())
    }
}

impl std::fmt::Display for TargetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.reference)
    }
}

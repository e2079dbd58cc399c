use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::error::{AcquireError, AcquireResult};
use super::target::TargetRef;
use super::ImageAcquirer;

/// Copies targets out of a local directory tree.
#[derive(Debug, Clone)]
pub struct LocalAcquirer {
    root: PathBuf,
}

impl LocalAcquirer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Maps a key to a relative path, refusing anything that could leave the root.
fn sanitize_key(key: &str) -> Option<PathBuf> {
    let mut out = PathBuf::new();

    for c in Path::new(key).components() {
        match c {
            Component::Normal(seg) => out.push(seg),
            Component::CurDir => continue,
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    if out.as_os_str().is_empty() {
        None
    } else {
        Some(out)
    }
}

#[async_trait]
impl ImageAcquirer for LocalAcquirer {
    async fn acquire(&self, target: &TargetRef, scratch_dir: &Path) -> AcquireResult<PathBuf> {
        let relative = sanitize_key(target.key()).ok_or_else(|| AcquireError::KeyOutsideRoot {
            key: target.key().to_string(),
        })?;
        let source = self.root.join(relative);

        if !tokio::fs::try_exists(&source).await.unwrap_or(false) {
            return Err(AcquireError::NotFound {
                key: target.key().to_string(),
            });
        }

        let dest = target.local_path(scratch_dir);
        tokio::fs::create_dir_all(scratch_dir)
            .await
            .map_err(|source| AcquireError::Io {
                path: scratch_dir.to_path_buf(),
                source,
            })?;

        let bytes = tokio::fs::copy(&source, &dest)
            .await
            .map_err(|e| AcquireError::Io {
                path: source.clone(),
                source: e,
            })?;

        debug!(source = %source.display(), dest = %dest.display(), bytes, "Target copied");
        Ok(dest)
    }
}

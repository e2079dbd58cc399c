use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::info;

use crate::aws::AwsCli;

use super::error::{AcquireError, AcquireResult};
use super::target::TargetRef;
use super::ImageAcquirer;

/// Downloads targets from a single S3 bucket with `aws s3 cp`.
#[derive(Debug, Clone)]
pub struct S3Acquirer {
    bucket: String,
    cli: AwsCli,
}

impl S3Acquirer {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            cli: AwsCli::new(),
        }
    }

    pub fn with_cli(mut self, cli: AwsCli) -> Self {
        self.cli = cli;
        self
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    fn object_uri(&self, key: &str) -> String {
        format!("s3://{}/{}", self.bucket, key)
    }
}

#[async_trait]
impl ImageAcquirer for S3Acquirer {
    async fn acquire(&self, target: &TargetRef, scratch_dir: &Path) -> AcquireResult<PathBuf> {
        let dest = target.local_path(scratch_dir);
        tokio::fs::create_dir_all(scratch_dir)
            .await
            .map_err(|source| AcquireError::Io {
                path: scratch_dir.to_path_buf(),
                source,
            })?;

        info!(bucket = %self.bucket, key = target.key(), "Downloading target from S3");

        let args = vec![
            "s3".to_string(),
            "cp".to_string(),
            self.object_uri(target.key()),
            dest.to_string_lossy().to_string(),
            "--only-show-errors".to_string(),
        ];
        self.cli.run(&args, "aws s3 cp").await?;

        info!(key = target.key(), "Target downloaded");
        Ok(dest)
    }
}

//! Thin async wrapper over the `aws` command-line client.
//!
//! Used by the S3 acquirer and the SNS reporter. Commands run once: there is no
//! retry loop here, callers decide what a failure means.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

/// Default per-command timeout.
pub const DEFAULT_CMD_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to spawn {label}: {source}")]
    Spawn {
        label: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{label} timed out after {timeout:?}")]
    Timeout { label: String, timeout: Duration },

    #[error("{label} failed: {stderr}")]
    Failed { label: String, stderr: String },
}

#[derive(Debug, Clone)]
pub struct AwsCli {
    program: PathBuf,
    timeout: Duration,
}

impl Default for AwsCli {
    fn default() -> Self {
        Self::new()
    }
}

impl AwsCli {
    /// Uses `aws` from `PATH`.
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("aws"),
            timeout: DEFAULT_CMD_TIMEOUT,
        }
    }

    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Runs `aws <args>` and returns its stdout.
    pub async fn run(&self, args: &[String], label: &str) -> Result<String, CliError> {
        debug!(label, program = %self.program.display(), "Running aws command");

        let child = Command::new(&self.program)
            .args(args)
            .kill_on_drop(true)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| CliError::Spawn {
                label: label.to_string(),
                source,
            })?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(res) => res.map_err(|source| CliError::Spawn {
                label: label.to_string(),
                source,
            })?,
            Err(_) => {
                return Err(CliError::Timeout {
                    label: label.to_string(),
                    timeout: self.timeout,
                });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(CliError::Failed {
                label: label.to_string(),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

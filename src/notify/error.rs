use thiserror::Error;

use crate::aws::CliError;

/// Delivery failures. Logged by [`Reporter::notify`](super::Reporter::notify), never propagated.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("no notification channel configured")]
    NoChannel,

    #[error("sns publish failed: {0}")]
    Cli(#[from] CliError),

    #[error("webhook request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("webhook returned status {status}")]
    Status { status: u16 },
}

//! Failure reporting side channel.
//!
//! Reporting is best-effort: [`Reporter::notify`] logs and swallows delivery
//! errors so a broken channel can never mask the failure being reported.

pub mod error;
pub mod reporters;


use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::config::{Config, NotifierKind};

pub use error::NotifyError;
pub use reporters::{LogReporter, SnsReporter, WebhookReporter};

#[async_trait]
/// Delivers a failure report to a notification channel.
pub trait Reporter: Send + Sync {
    /// Attempts delivery.
    async fn send(&self, channel: &str, subject: &str, message: &str) -> Result<(), NotifyError>;

    /// Delivers without surfacing errors.
    async fn notify(&self, channel: &str, subject: &str, message: &str) {
        match self.send(channel, subject, message).await {
            Ok(()) => info!(channel, subject, "Failure notification published"),
            Err(e) => error!(error = %e, channel, subject, "Failure notification not delivered"),
        }
    }
}

/// Builds the reporter selected by [`Config::notifier`].
pub fn build_reporter(config: &Config) -> Arc<dyn Reporter> {
    match config.notifier {
        NotifierKind::Log => Arc::new(LogReporter),
        NotifierKind::Sns => Arc::new(SnsReporter::new()),
        NotifierKind::Webhook => Arc::new(WebhookReporter::new()),
    }
}

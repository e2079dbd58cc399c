use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Serialize;
use tracing::error;

use crate::aws::AwsCli;

use super::error::NotifyError;
use super::Reporter;

const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(5);

/// Writes reports to the log only.
#[derive(Debug, Clone, Default)]
pub struct LogReporter;

#[async_trait]
impl Reporter for LogReporter {
    async fn send(&self, channel: &str, subject: &str, message: &str) -> Result<(), NotifyError> {
        error!(channel, subject, message, "Detection failure");
        Ok(())
    }
}

/// Publishes reports to an SNS topic with `aws sns publish`.
#[derive(Debug, Clone, Default)]
pub struct SnsReporter {
    cli: AwsCli,
}

impl SnsReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cli(mut self, cli: AwsCli) -> Self {
        self.cli = cli;
        self
    }
}

#[async_trait]
impl Reporter for SnsReporter {
    async fn send(&self, channel: &str, subject: &str, message: &str) -> Result<(), NotifyError> {
        if channel.is_empty() {
            return Err(NotifyError::NoChannel);
        }

        let args = vec![
            "sns".to_string(),
            "publish".to_string(),
            "--target-arn".to_string(),
            channel.to_string(),
            "--subject".to_string(),
            subject.to_string(),
            "--message".to_string(),
            message.to_string(),
        ];
        self.cli.run(&args, "aws sns publish").await?;
        Ok(())
    }
}

#[derive(Serialize)]
struct WebhookPayload<'a> {
    channel: &'a str,
    subject: &'a str,
    message: &'a str,
}

/// POSTs reports as JSON to the channel URL.
#[derive(Debug, Clone)]
pub struct WebhookReporter {
    http: HttpClient,
}

impl WebhookReporter {
    pub fn new() -> Self {
        Self {
            http: HttpClient::builder()
                .timeout(WEBHOOK_TIMEOUT)
                .build()
                .unwrap_or_else(|_| HttpClient::new()),
        }
    }
}

impl Default for WebhookReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Reporter for WebhookReporter {
    async fn send(&self, channel: &str, subject: &str, message: &str) -> Result<(), NotifyError> {
        if channel.is_empty() {
            return Err(NotifyError::NoChannel);
        }

        let resp = self
            .http
            .post(channel)
            .json(&WebhookPayload {
                channel,
                subject,
                message,
            })
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(NotifyError::Status {
                status: resp.status().as_u16(),
            });
        }
        Ok(())
    }
}

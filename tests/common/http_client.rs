//! HTTP client helpers for tests.

use std::time::Duration;

use serde::Deserialize;
use sigdetect::detection::{Batch, Report};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub category: String,
    pub code: u16,
}

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TestClientError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("status {status}: {body:?}")]
    Status { status: u16, body: ErrorBody },
}

impl TestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn detect(&self, batch: &Batch) -> Result<Report, TestClientError> {
        self.detect_raw(&serde_json::to_value(batch).unwrap()).await
    }

    pub async fn detect_raw(&self, body: &serde_json::Value) -> Result<Report, TestClientError> {
        let resp = self.client.post(self.url("/v1/detect")).json(body).send().await?;

        let status = resp.status().as_u16();
        if status == 200 {
            Ok(resp.json().await?)
        } else {
            Err(TestClientError::Status {
                status,
                body: resp.json().await?,
            })
        }
    }

    pub async fn health(&self) -> Result<HealthResponse, TestClientError> {
        Ok(self.client.get(self.url("/healthz")).send().await?.json().await?)
    }
}

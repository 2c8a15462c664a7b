//! HTTP client helpers for tests.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
    prefix: String,
    forwarded_for: Option<String>,
}

/// Status, selected headers, and JSON body of a response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: u16,
    pub retry_after: Option<String>,
    pub rate_limit_remaining: Option<String>,
    pub body: Value,
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
            prefix: String::new(),
            forwarded_for: None,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Sends `X-Forwarded-For` on scoring requests.
    pub fn as_client(mut self, ip: impl Into<String>) -> Self {
        self.forwarded_for = Some(ip.into());
        self
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    fn scoring_url(&self, path: &str) -> String {
        self.url(&format!("{}{}", self.prefix, path))
    }

    pub async fn evaluate_answer(&self, body: &Value) -> Result<TestResponse, TestClientError> {
        self.post(&self.scoring_url("/evaluate-answer"), body).await
    }

    pub async fn rank_candidates(&self, body: &Value) -> Result<TestResponse, TestClientError> {
        self.post(&self.scoring_url("/rank-candidates"), body).await
    }

    pub async fn post_raw(&self, path: &str, raw: &str) -> Result<TestResponse, TestClientError> {
        let resp = self
            .client
            .post(self.scoring_url(path))
            .header("Content-Type", "application/json")
            .body(raw.to_string())
            .send()
            .await?;
        Self::collect(resp).await
    }

    async fn post(&self, url: &str, body: &Value) -> Result<TestResponse, TestClientError> {
        let mut builder = self.client.post(url).json(body);
        if let Some(ip) = &self.forwarded_for {
            builder = builder.header("X-Forwarded-For", ip);
        }
        Self::collect(builder.send().await?).await
    }

    async fn collect(resp: reqwest::Response) -> Result<TestResponse, TestClientError> {
        let header = |name: &str| {
            resp.headers()
                .get(name)
                .and_then(|h| h.to_str().ok())
                .map(String::from)
        };
        let status = resp.status().as_u16();
        let retry_after = header("retry-after");
        let rate_limit_remaining = header("x-ratelimit-remaining");

        let text = resp.text().await?;
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);

        Ok(TestResponse {
            status,
            retry_after,
            rate_limit_remaining,
            body,
        })
    }

    pub async fn health(&self) -> Result<HealthResponse, TestClientError> {
        let resp = self.client.get(self.url("/health")).send().await?;

        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            Err(TestClientError::UnexpectedStatus(status, body))
        }
    }

    pub async fn status_of(&self, method: reqwest::Method, path: &str) -> Result<u16, TestClientError> {
        let resp = self.client.request(method, self.url(path)).send().await?;
        Ok(resp.status().as_u16())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TestClientError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {0} - Body: {1}")]
    UnexpectedStatus(u16, String),
}

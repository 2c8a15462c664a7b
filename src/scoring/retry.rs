use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use super::error::ScoringResult;
use super::scorer::AnswerScorer;
use super::types::{ScoreResult, ScoringRequest};

pub const DEFAULT_BACKOFF_BASE_MS: u64 = 250;

/// Retries `Upstream` failures with exponential backoff. Parse and schema failures are
/// returned immediately.
pub struct RetryingScorer {
    inner: Arc<dyn AnswerScorer>,
    max_retries: u32,
    backoff_base: Duration,
}

impl RetryingScorer {
    pub fn new(inner: Arc<dyn AnswerScorer>, max_retries: u32) -> Self {
        Self {
            inner,
            max_retries,
            backoff_base: Duration::from_millis(DEFAULT_BACKOFF_BASE_MS),
        }
    }

    pub fn with_backoff_base(mut self, backoff_base: Duration) -> Self {
        self.backoff_base = backoff_base;
        self
    }

    fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff_base
            .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)))
    }
}

#[async_trait]
impl AnswerScorer for RetryingScorer {
    async fn score(&self, request: &ScoringRequest) -> ScoringResult<ScoreResult> {
        let max_attempts = self.max_retries.saturating_add(1);
        let mut attempt = 1;

        loop {
            match self.inner.score(request).await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_retryable() && attempt < max_attempts => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Upstream scoring failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn model(&self) -> &str {
        self.inner.model()
    }
}

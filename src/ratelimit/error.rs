use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RateLimitError {
    /// The identity already holds `limit` admissions inside the current window.
    #[error("rate limit exceeded: maximum {limit} requests per {window_secs}s")]
    Exceeded {
        limit: u32,
        window_secs: u64,
        /// Time until the oldest recorded admission leaves the window.
        retry_after: Duration,
    },
}

impl RateLimitError {
    /// Whole seconds for a `Retry-After` header, never less than one.
    pub fn retry_after_secs(&self) -> u64 {
        match self {
            Self::Exceeded { retry_after, .. } => {
                let secs = retry_after.as_secs();
                let secs = if retry_after.subsec_nanos() > 0 {
                    secs + 1
                } else {
                    secs
                };
                secs.max(1)
            }
        }
    }
}

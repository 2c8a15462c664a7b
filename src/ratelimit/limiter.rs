use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::clock::{Clock, SystemClock};
use super::error::RateLimitError;

/// Outcome of an admitted check, used for `X-RateLimit-*` headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admission {
    pub limit: u32,
    pub remaining: u32,
}

/// Counting sliding-window limiter keyed by client identity.
///
/// Each identity keeps the instants of its admitted requests inside the trailing window.
/// Purge, count, and append happen under one lock, so concurrent checks for the same
/// identity never admit more than `limit` requests per window.
pub struct SlidingWindowLimiter {
    clock: Arc<dyn Clock>,
    limit: u32,
    window: Duration,
    records: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl std::fmt::Debug for SlidingWindowLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlidingWindowLimiter")
            .field("limit", &self.limit)
            .field("window", &self.window)
            .field("tracked", &self.tracked_identities())
            .finish()
    }
}

impl SlidingWindowLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self::with_clock(limit, window, Arc::new(SystemClock))
    }

    pub fn with_clock(limit: u32, window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            limit,
            window,
            records: Mutex::new(HashMap::new()),
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Admits and records the request, or rejects it without recording.
    pub fn check(&self, identity: &str) -> Result<Admission, RateLimitError> {
        let mut records = self.records.lock();
        let now = self.clock.now();

        let timestamps = records.entry(identity.to_string()).or_default();
        purge_expired(timestamps, now, self.window);

        let count = timestamps.len();
        if count >= self.limit as usize {
            let retry_after = timestamps
                .front()
                .map(|oldest| self.window.saturating_sub(now.saturating_duration_since(*oldest)))
                .unwrap_or(self.window);
            return Err(RateLimitError::Exceeded {
                limit: self.limit,
                window_secs: self.window.as_secs(),
                retry_after,
            });
        }

        timestamps.push_back(now);
        Ok(Admission {
            limit: self.limit,
            remaining: self.limit.saturating_sub(count as u32 + 1),
        })
    }

    /// Drops identities whose recorded requests have all left the window.
    pub fn evict_idle(&self) -> usize {
        let mut records = self.records.lock();
        let now = self.clock.now();
        let before = records.len();

        records.retain(|_, timestamps| {
            purge_expired(timestamps, now, self.window);
            !timestamps.is_empty()
        });

        before - records.len()
    }

    pub fn tracked_identities(&self) -> usize {
        self.records.lock().len()
    }

    /// Runs [`evict_idle`](Self::evict_idle) every `interval` until the task is aborted.
    pub fn spawn_sweeper(self: Arc<Self>, interval: Duration) -> JoinHandle<()> {
        if interval.is_zero() {
            warn!("Rate-limit sweep interval is zero; sweeper disabled");
            return tokio::spawn(async {});
        }

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let evicted = self.evict_idle();
                if evicted > 0 {
                    debug!(
                        evicted,
                        remaining = self.tracked_identities(),
                        "Swept idle rate-limit records"
                    );
                }
            }
        })
    }
}

fn purge_expired(timestamps: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(oldest) = timestamps.front() {
        if now.saturating_duration_since(*oldest) >= window {
            timestamps.pop_front();
        } else {
            break;
        }
    }
}

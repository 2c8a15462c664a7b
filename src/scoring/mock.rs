//! Offline scorers: a deterministic mock provider and a scripted test double.

use async_trait::async_trait;

use super::error::{ScoringError, ScoringResult};
use super::scorer::AnswerScorer;
use super::types::{ScoreResult, ScoringRequest};

/// Answers containing this marker make [`MockScorer`] fail with an upstream error.
pub const MOCK_FAILURE_MARKER: &str = "[[mock:fail]]";

pub const MOCK_MODEL: &str = "mock-scorer";

/// Deterministic scorer used when `SCREENER_MOCK_PROVIDER` is set.
///
/// Scores by word count so that longer answers rank higher; no network access.
#[derive(Debug, Clone, Default)]
pub struct MockScorer;

impl MockScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score_for_word_count(words: usize) -> u8 {
        match words {
            0..=4 => 1,
            5..=14 => 2,
            15..=29 => 3,
            30..=59 => 4,
            _ => 5,
        }
    }
}

#[async_trait]
impl AnswerScorer for MockScorer {
    async fn score(&self, request: &ScoringRequest) -> ScoringResult<ScoreResult> {
        if request.answer_text.contains(MOCK_FAILURE_MARKER) {
            return Err(ScoringError::upstream("mock provider failure requested"));
        }

        let words = request.answer_text.split_whitespace().count();
        Ok(ScoreResult {
            score: Self::score_for_word_count(words),
            summary: format!("Mock evaluation of a {words}-word answer"),
            improvement: "Mock suggestion: add a concrete example".to_string(),
        })
    }

    fn model(&self) -> &str {
        MOCK_MODEL
    }
}

#[cfg(any(test, feature = "mock"))]
pub use scripted::ScriptedScorer;

#[cfg(any(test, feature = "mock"))]
mod scripted {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use parking_lot::Mutex;

    use super::super::error::{ScoringError, ScoringResult};
    use super::super::scorer::AnswerScorer;
    use super::super::types::{ScoreResult, ScoringRequest};

    /// Test double returning canned outcomes keyed by answer text.
    ///
    /// Tracks call count and the peak number of concurrent in-flight calls so tests can
    /// assert fan-out behaviour.
    pub struct ScriptedScorer {
        outcomes: Mutex<HashMap<String, ScoringResult<ScoreResult>>>,
        default_outcome: ScoringResult<ScoreResult>,
        delay: Duration,
        panic_on: Option<String>,
        calls: AtomicUsize,
        completed: AtomicUsize,
        in_flight: AtomicUsize,
        peak_in_flight: AtomicUsize,
        seen: Mutex<Vec<ScoringRequest>>,
    }

    impl Default for ScriptedScorer {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ScriptedScorer {
        pub fn new() -> Self {
            Self {
                outcomes: Mutex::new(HashMap::new()),
                default_outcome: Err(ScoringError::upstream("no scripted outcome")),
                delay: Duration::ZERO,
                panic_on: None,
                calls: AtomicUsize::new(0),
                completed: AtomicUsize::new(0),
                in_flight: AtomicUsize::new(0),
                peak_in_flight: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            }
        }

        pub fn with_score(self, answer: &str, score: u8, summary: &str, improvement: &str) -> Self {
            self.outcomes.lock().insert(
                answer.to_string(),
                Ok(ScoreResult {
                    score,
                    summary: summary.to_string(),
                    improvement: improvement.to_string(),
                }),
            );
            self
        }

        pub fn with_error(self, answer: &str, error: ScoringError) -> Self {
            self.outcomes.lock().insert(answer.to_string(), Err(error));
            self
        }

        pub fn with_default(mut self, outcome: ScoringResult<ScoreResult>) -> Self {
            self.default_outcome = outcome;
            self
        }

        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        /// Panics inside `score` for this answer (exercises task-level isolation).
        pub fn with_panic_on(mut self, answer: &str) -> Self {
            self.panic_on = Some(answer.to_string());
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        /// Calls that ran to the end of their delay (aborted calls never count).
        pub fn completed(&self) -> usize {
            self.completed.load(Ordering::SeqCst)
        }

        pub fn peak_in_flight(&self) -> usize {
            self.peak_in_flight.load(Ordering::SeqCst)
        }

        pub fn seen_requests(&self) -> Vec<ScoringRequest> {
            self.seen.lock().clone()
        }
    }

    #[async_trait]
    impl AnswerScorer for ScriptedScorer {
        async fn score(&self, request: &ScoringRequest) -> ScoringResult<ScoreResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().push(request.clone());

            let now_in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak_in_flight.fetch_max(now_in_flight, Ordering::SeqCst);

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.completed.fetch_add(1, Ordering::SeqCst);

            if self.panic_on.as_deref() == Some(request.answer_text.as_str()) {
                panic!("scripted panic for {}", request.answer_text);
            }

            self.outcomes
                .lock()
                .get(&request.answer_text)
                .cloned()
                .unwrap_or_else(|| self.default_outcome.clone())
        }

        fn model(&self) -> &str {
            "scripted-scorer"
        }
    }
}

//! Single-answer evaluation: one scoring call, timed and stamped.


use std::sync::Arc;
use std::time::Instant;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::scoring::{AnswerScorer, ScoreResult, ScoringError, ScoringRequest};

/// Provenance attached to every evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationMetadata {
    pub model: String,
    /// UTC completion time, RFC 3339 with a `Z` suffix.
    pub timestamp: String,
}

/// A scored answer as returned by `POST /evaluate-answer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub score: u8,
    pub summary: String,
    pub improvement: String,
    pub evaluation_time_ms: u64,
    pub metadata: EvaluationMetadata,
}

impl Evaluation {
    pub fn score_result(&self) -> ScoreResult {
        ScoreResult {
            score: self.score,
            summary: self.summary.clone(),
            improvement: self.improvement.clone(),
        }
    }
}

pub struct AnswerEvaluator {
    scorer: Arc<dyn AnswerScorer>,
}

impl std::fmt::Debug for AnswerEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnswerEvaluator")
            .field("model", &self.scorer.model())
            .finish()
    }
}

impl AnswerEvaluator {
    pub fn new(scorer: Arc<dyn AnswerScorer>) -> Self {
        Self { scorer }
    }

    pub fn model(&self) -> &str {
        self.scorer.model()
    }

    /// Scores one answer. Only the scorer call is timed; failures are returned as-is.
    #[instrument(skip(self, request), fields(model = %self.scorer.model(), answer_chars = request.answer_text.chars().count()))]
    pub async fn evaluate(&self, request: &ScoringRequest) -> Result<Evaluation, ScoringError> {
        let started = Instant::now();
        let outcome = self.scorer.score(request).await;
        let evaluation_time_ms = elapsed_ms(started);

        let result = match outcome {
            Ok(result) => result,
            Err(e) => {
                warn!(kind = e.kind(), elapsed_ms = evaluation_time_ms, error = %e, "Evaluation failed");
                return Err(e);
            }
        };

        debug!(score = result.score, elapsed_ms = evaluation_time_ms, "Evaluation complete");

        Ok(Evaluation {
            score: result.score,
            summary: result.summary,
            improvement: result.improvement,
            evaluation_time_ms,
            metadata: EvaluationMetadata {
                model: self.scorer.model().to_string(),
                timestamp: utc_timestamp(),
            },
        })
    }
}

pub(crate) fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

pub(crate) fn utc_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

use serde::{Deserialize, Serialize};

/// Input to one scoring call. Built from already-validated boundary input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringRequest {
    /// The answer text, trimmed and non-empty.
    pub answer_text: String,
    pub question: Option<String>,
    pub context: Option<String>,
}

impl ScoringRequest {
    pub fn new(
        answer_text: impl Into<String>,
        question: Option<String>,
        context: Option<String>,
    ) -> Self {
        Self {
            answer_text: answer_text.into(),
            question,
            context,
        }
    }

    /// A request carrying only the answer (the batch path never sends question/context).
    pub fn answer_only(answer_text: impl Into<String>) -> Self {
        Self::new(answer_text, None, None)
    }
}

/// A validated model verdict.
///
/// Only produced by [`parse_score_reply`](super::parse::parse_score_reply) or by a scorer
/// that upholds the same bounds: `score` in 1..=5, non-empty `summary` and `improvement`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u8,
    pub summary: String,
    pub improvement: String,
}

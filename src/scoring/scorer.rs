use async_trait::async_trait;

use super::error::ScoringResult;
use super::types::{ScoreResult, ScoringRequest};

/// Boundary over the external scoring capability.
///
/// Implementations return a fully validated [`ScoreResult`] or a [`ScoringError`]
/// (`Upstream`, `Parse`, `Schema`); never a partially populated result.
///
/// [`ScoringError`]: super::error::ScoringError
#[async_trait]
pub trait AnswerScorer: Send + Sync {
    async fn score(&self, request: &ScoringRequest) -> ScoringResult<ScoreResult>;

    /// Identifier of the model behind this scorer, reported in evaluation metadata.
    fn model(&self) -> &str;
}

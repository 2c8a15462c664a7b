use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinSet;
use tracing::{info, instrument, warn};

use super::error::RankingError;
use super::ranker::rank_candidates;
use super::types::{CandidateEvaluation, CandidateInput, RankingOutcome};
use crate::constants::MAX_BATCH_SIZE;
use crate::evaluation::{AnswerEvaluator, elapsed_ms};
use crate::scoring::{ScoreResult, ScoringRequest, ScoringResult};

/// Scores a batch concurrently and ranks the results.
///
/// One task per candidate, all spawned into a [`JoinSet`] before any is awaited. A
/// candidate whose evaluation fails or panics receives the fallback result; the batch
/// itself only fails on invalid input.
#[derive(Debug, Clone)]
pub struct RankingEngine {
    evaluator: Arc<AnswerEvaluator>,
}

impl RankingEngine {
    pub fn new(evaluator: Arc<AnswerEvaluator>) -> Self {
        Self { evaluator }
    }

    #[instrument(skip(self, candidates), fields(batch_size = candidates.len()))]
    pub async fn rank_batch(
        &self,
        candidates: Vec<CandidateInput>,
    ) -> Result<RankingOutcome, RankingError> {
        validate_batch(&candidates)?;

        let started = Instant::now();
        let total_candidates = candidates.len();

        let mut owners = Vec::with_capacity(total_candidates);
        let mut slots = HashMap::with_capacity(total_candidates);
        let mut tasks = JoinSet::new();
        for (index, candidate) in candidates.into_iter().enumerate() {
            let evaluator = Arc::clone(&self.evaluator);
            let request = ScoringRequest::answer_only(candidate.answer);
            let handle = tasks.spawn(async move { evaluator.evaluate(&request).await });
            slots.insert(handle.id(), index);
            owners.push((candidate.id, candidate.metadata));
        }

        // Dropping the set (e.g. on client disconnect) aborts every in-flight evaluation.
        let mut outcomes: Vec<Option<ScoringResult<ScoreResult>>> =
            (0..total_candidates).map(|_| None).collect();
        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((id, outcome)) => {
                    if let Some(&index) = slots.get(&id) {
                        outcomes[index] = Some(outcome.map(|evaluation| evaluation.score_result()));
                    }
                }
                Err(join_err) => {
                    if let Some(&index) = slots.get(&join_err.id()) {
                        warn!(candidate_id = %owners[index].0, error = %join_err, "Candidate evaluation task aborted; using fallback");
                    }
                }
            }
        }

        let mut failures = 0usize;
        let evaluations: Vec<CandidateEvaluation> = owners
            .into_iter()
            .zip(outcomes)
            .map(|((id, metadata), outcome)| match outcome {
                Some(Ok(result)) => CandidateEvaluation {
                    id,
                    result,
                    metadata,
                },
                Some(Err(e)) => {
                    failures += 1;
                    warn!(candidate_id = %id, kind = e.kind(), error = %e, "Candidate evaluation failed; using fallback");
                    CandidateEvaluation::fallback(id, metadata)
                }
                None => {
                    failures += 1;
                    CandidateEvaluation::fallback(id, metadata)
                }
            })
            .collect();

        let ranked_candidates = rank_candidates(evaluations);
        let evaluation_time_ms = elapsed_ms(started);

        info!(
            total_candidates,
            failures,
            elapsed_ms = evaluation_time_ms,
            "Batch ranked"
        );

        Ok(RankingOutcome {
            ranked_candidates,
            total_candidates,
            evaluation_time_ms,
        })
    }
}

/// Rejects empty, oversized, or duplicate-id batches.
pub fn validate_batch(candidates: &[CandidateInput]) -> Result<(), RankingError> {
    if candidates.is_empty() {
        return Err(RankingError::invalid_batch("at least one candidate is required"));
    }
    if candidates.len() > MAX_BATCH_SIZE {
        return Err(RankingError::invalid_batch(format!(
            "{} candidates exceeds the maximum of {MAX_BATCH_SIZE}",
            candidates.len()
        )));
    }

    let mut seen = HashSet::with_capacity(candidates.len());
    for candidate in candidates {
        if !seen.insert(candidate.id.as_str()) {
            return Err(RankingError::invalid_batch(format!(
                "duplicate candidate id: {}",
                candidate.id
            )));
        }
    }

    Ok(())
}

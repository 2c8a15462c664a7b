use std::cmp::Ordering;

use super::types::{CandidateEvaluation, RankedCandidate};

/// Sorts by score descending, then id ascending, and assigns ranks `1..=N`.
///
/// Ids are compared byte-wise, so the output depends only on the set of inputs and never
/// on their order. Ranks have no gaps and no ties.
pub fn rank_candidates(mut evaluations: Vec<CandidateEvaluation>) -> Vec<RankedCandidate> {
    evaluations.sort_by(compare_for_rank);

    evaluations
        .into_iter()
        .zip(1u32..)
        .map(|(evaluation, rank)| RankedCandidate {
            id: evaluation.id,
            score: evaluation.result.score,
            summary: evaluation.result.summary,
            improvement: evaluation.result.improvement,
            rank,
            metadata: evaluation.metadata,
        })
        .collect()
}

fn compare_for_rank(a: &CandidateEvaluation, b: &CandidateEvaluation) -> Ordering {
    b.result
        .score
        .cmp(&a.result.score)
        .then_with(|| a.id.as_bytes().cmp(b.id.as_bytes()))
}

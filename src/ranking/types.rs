use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{FALLBACK_IMPROVEMENT, FALLBACK_SCORE, FALLBACK_SUMMARY};
use crate::scoring::ScoreResult;

/// Opaque caller-supplied metadata, echoed back unchanged.
pub type CandidateMetadata = Map<String, Value>;

/// One candidate of a batch, already validated at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateInput {
    pub id: String,
    pub answer: String,
    pub metadata: Option<CandidateMetadata>,
}

impl CandidateInput {
    pub fn new(id: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            answer: answer.into(),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: CandidateMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// A candidate's resolved evaluation (real or fallback), before ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateEvaluation {
    pub id: String,
    pub result: ScoreResult,
    pub metadata: Option<CandidateMetadata>,
}

impl CandidateEvaluation {
    pub fn new(id: impl Into<String>, result: ScoreResult) -> Self {
        Self {
            id: id.into(),
            result,
            metadata: None,
        }
    }

    /// The fixed result used when a candidate could not be evaluated.
    pub fn fallback(id: impl Into<String>, metadata: Option<CandidateMetadata>) -> Self {
        Self {
            id: id.into(),
            result: ScoreResult {
                score: FALLBACK_SCORE,
                summary: FALLBACK_SUMMARY.to_string(),
                improvement: FALLBACK_IMPROVEMENT.to_string(),
            },
            metadata,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub id: String,
    pub score: u8,
    pub summary: String,
    pub improvement: String,
    /// 1-based, dense, unique within a batch.
    pub rank: u32,
    pub metadata: Option<CandidateMetadata>,
}

/// Response of `POST /rank-candidates`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingOutcome {
    pub ranked_candidates: Vec<RankedCandidate>,
    pub total_candidates: usize,
    pub evaluation_time_ms: u64,
}

//! Batch ranking: concurrent fan-out over a candidate batch plus a pure, deterministic
//! sort-and-rank step.
//!
//! [`rank_candidates`] can be used on its own; [`RankingEngine`] feeds it.

pub mod engine;
pub mod error;
pub mod ranker;
pub mod types;


pub use engine::{RankingEngine, validate_batch};
pub use error::RankingError;
pub use ranker::rank_candidates;
pub use types::{
    CandidateEvaluation, CandidateInput, CandidateMetadata, RankedCandidate, RankingOutcome,
};

//! Interview screener library crate (used by the server binary and integration tests).
//!
//! Scores free-text interview answers with an external generative model and ranks
//! batches of candidates by score.
//!
//! # Modules
//!
//! - [`scoring`]: the model boundary ([`AnswerScorer`], reply parsing, retries, mocks)
//! - [`ratelimit`]: per-client sliding-window admission control
//! - [`evaluation`]: one timed scoring call with metadata
//! - [`ranking`]: concurrent batch scoring and the deterministic ranker
//! - [`gateway`]: the Axum router, validation, and error mapping
//! - [`config`], [`telemetry`]: environment configuration and tracing setup
//!
//! ## Test/Mock Support
//! [`scoring::ScriptedScorer`] is available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod evaluation;
pub mod gateway;
pub mod ranking;
pub mod ratelimit;
pub mod scoring;
pub mod telemetry;

pub use config::{Config, ConfigError, LogFormat};
pub use evaluation::{AnswerEvaluator, Evaluation, EvaluationMetadata};
pub use gateway::{GatewayError, HandlerState, RouterOptions, create_router_with_state};
pub use ranking::{
    CandidateEvaluation, CandidateInput, RankedCandidate, RankingEngine, RankingError,
    RankingOutcome, rank_candidates,
};
pub use ratelimit::{Clock, ManualClock, RateLimitError, SlidingWindowLimiter, SystemClock};
#[cfg(any(test, feature = "mock"))]
pub use scoring::ScriptedScorer;
pub use scoring::{
    AnswerScorer, GenAiScorer, MockScorer, RetryingScorer, ScoreResult, ScoringError,
    ScoringRequest,
};
pub use telemetry::init_tracing;

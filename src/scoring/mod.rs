//! Scoring gateway: the boundary over the external generative model.
//!
//! A scorer takes a [`ScoringRequest`] and returns a validated [`ScoreResult`] or one of
//! three [`ScoringError`] kinds:
//!
//! - `Upstream`: network, provider, or timeout failure
//! - `Parse`: the reply contained no well-formed JSON object
//! - `Schema`: the object was missing a field or a value was out of bounds
//!
//! [`GenAiScorer`] talks to a real provider; [`MockScorer`] is a deterministic offline
//! stand-in; [`RetryingScorer`] adds bounded backoff for upstream failures.

pub mod error;
pub mod genai;
pub mod mock;
pub mod parse;
pub mod retry;
pub mod scorer;
pub mod types;


pub use error::{ScoringError, ScoringResult};
pub use genai::{GenAiScorer, build_evaluation_prompt};
#[cfg(any(test, feature = "mock"))]
pub use mock::ScriptedScorer;
pub use mock::{MOCK_FAILURE_MARKER, MOCK_MODEL, MockScorer};
pub use parse::parse_score_reply;
pub use retry::RetryingScorer;
pub use scorer::AnswerScorer;
pub use types::{ScoreResult, ScoringRequest};

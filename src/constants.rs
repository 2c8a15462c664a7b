//! Cross-cutting, shared constants.
//!
//! Input bounds are enforced once at the HTTP boundary; the reply bounds are enforced by
//! the scoring gateway before a model reply is trusted.

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 5;

pub const MAX_ANSWER_CHARS: usize = 5000;
pub const MAX_QUESTION_CHARS: usize = 1000;
pub const MAX_CONTEXT_CHARS: usize = 2000;
pub const MAX_CANDIDATE_ID_CHARS: usize = 100;
pub const MAX_BATCH_SIZE: usize = 50;

/// Upper bound on `summary` and `improvement` in a model reply.
pub const MAX_FEEDBACK_CHARS: usize = 500;

/// Score assigned to a candidate whose evaluation failed inside a batch.
pub const FALLBACK_SCORE: u8 = MIN_SCORE;
pub const FALLBACK_SUMMARY: &str = "Evaluation failed";
pub const FALLBACK_IMPROVEMENT: &str = "Unable to evaluate this response";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_SCORING_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_RATE_LIMIT: u32 = 10;
pub const DEFAULT_RATE_WINDOW_SECS: u64 = 60;
pub const DEFAULT_RATE_SWEEP_SECS: u64 = 300;
pub const DEFAULT_SERVICE_NAME: &str = "AI Interview Screener";

/// Crate version reported by `/health` and `/`.
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

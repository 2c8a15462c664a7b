use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RankingError {
    /// The batch was empty, too large, or held duplicate ids.
    #[error("invalid batch: {reason}")]
    InvalidBatch { reason: String },
}

impl RankingError {
    pub fn invalid_batch(reason: impl Into<String>) -> Self {
        Self::InvalidBatch {
            reason: reason.into(),
        }
    }
}

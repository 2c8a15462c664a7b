use thiserror::Error;

/// Failure modes of a single scoring call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScoringError {
    /// Transport, provider, or timeout failure.
    #[error("upstream scoring call failed: {reason}")]
    Upstream { reason: String },

    /// The reply held no well-formed JSON object.
    #[error("unparseable scoring reply: {reason}")]
    Parse { reason: String },

    /// The reply object was missing a field or held an out-of-bounds value.
    #[error("invalid scoring reply: {reason}")]
    Schema { reason: String },
}

impl ScoringError {
    pub fn upstream(reason: impl Into<String>) -> Self {
        Self::Upstream {
            reason: reason.into(),
        }
    }

    pub fn parse(reason: impl Into<String>) -> Self {
        Self::Parse {
            reason: reason.into(),
        }
    }

    pub fn schema(reason: impl Into<String>) -> Self {
        Self::Schema {
            reason: reason.into(),
        }
    }

    /// Only upstream failures are worth retrying; a bad reply is not transient.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Upstream { .. })
    }

    /// Short stable label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Upstream { .. } => "upstream",
            Self::Parse { .. } => "parse",
            Self::Schema { .. } => "schema",
        }
    }
}

pub type ScoringResult<T> = Result<T, ScoringError>;

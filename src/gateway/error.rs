use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{HeaderValue, StatusCode, header::RETRY_AFTER},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::gateway::payload::FieldError;
use crate::ranking::RankingError;
use crate::ratelimit::RateLimitError;
use crate::scoring::ScoringError;

pub const EVALUATION_FAILED_MESSAGE: &str = "Failed to evaluate answer. Please try again.";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error. Please try again later.";
pub const INVALID_REQUEST_MESSAGE: &str = "Invalid request";
pub const VALIDATION_ERROR_MESSAGE: &str = "Validation error";

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Well-formed body that breaks a domain rule (bounds, blank text, duplicate ids).
    #[error("invalid request: {} field error(s)", .errors.len())]
    InvalidRequest { errors: Vec<FieldError> },

    /// Body that is not JSON or does not have the expected shape.
    #[error("schema validation failed: {0}")]
    SchemaValidation(String),

    #[error(transparent)]
    RateLimited(#[from] RateLimitError),

    #[error("evaluation failed: {0}")]
    EvaluationFailed(#[from] ScoringError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    pub fn invalid_request(errors: Vec<FieldError>) -> Self {
        Self::InvalidRequest { errors }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            Self::SchemaValidation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            Self::EvaluationFailed(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for GatewayError {
    fn from(rejection: JsonRejection) -> Self {
        Self::SchemaValidation(rejection.body_text())
    }
}

impl From<RankingError> for GatewayError {
    fn from(err: RankingError) -> Self {
        match err {
            RankingError::InvalidBatch { reason } => Self::invalid_request(vec![FieldError::new(
                "candidates",
                reason,
            )]),
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

/// "per minute" for the default window, otherwise the window in seconds.
fn window_phrase(window_secs: u64) -> String {
    if window_secs == 60 {
        "per minute".to_string()
    } else {
        format!("per {window_secs} seconds")
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut retry_after = None;

        let (message, errors) = match self {
            GatewayError::InvalidRequest { errors } => (INVALID_REQUEST_MESSAGE.to_string(), errors),
            GatewayError::SchemaValidation(detail) => (
                VALIDATION_ERROR_MESSAGE.to_string(),
                vec![FieldError::new("body", detail)],
            ),
            GatewayError::RateLimited(err) => {
                retry_after = Some(err.retry_after_secs());
                let RateLimitError::Exceeded {
                    limit, window_secs, ..
                } = err;
                (
                    format!(
                        "Rate limit exceeded. Maximum {limit} requests {}.",
                        window_phrase(window_secs)
                    ),
                    Vec::new(),
                )
            }
            GatewayError::EvaluationFailed(err) => {
                error!(kind = err.kind(), error = %err, "Answer evaluation failed");
                (EVALUATION_FAILED_MESSAGE.to_string(), Vec::new())
            }
            GatewayError::Internal(detail) => {
                error!(error = %detail, "Internal error");
                (INTERNAL_ERROR_MESSAGE.to_string(), Vec::new())
            }
        };

        let body = Json(ErrorResponse {
            error: message,
            code: status.as_u16(),
            errors,
        });

        let mut response = (status, body).into_response();
        if let Some(secs) = retry_after {
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}

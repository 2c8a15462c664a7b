use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Serialize;
use tracing::{info, instrument};

use crate::evaluation::Evaluation;
use crate::gateway::error::GatewayError;
use crate::gateway::payload::{EvaluateAnswerRequest, RankCandidatesRequest};
use crate::gateway::state::HandlerState;
use crate::ranking::RankingOutcome;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: String,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub message: String,
    pub version: &'static str,
    pub health: &'static str,
}

#[instrument(skip(state, payload))]
pub async fn evaluate_answer_handler(
    State(state): State<HandlerState>,
    payload: Result<Json<EvaluateAnswerRequest>, JsonRejection>,
) -> Result<Json<Evaluation>, GatewayError> {
    let Json(payload) = payload?;
    let request = payload
        .into_scoring_request()
        .map_err(GatewayError::invalid_request)?;

    let evaluation = state.evaluator.evaluate(&request).await?;

    info!(
        score = evaluation.score,
        elapsed_ms = evaluation.evaluation_time_ms,
        "Answer evaluated"
    );
    Ok(Json(evaluation))
}

#[instrument(skip(state, payload))]
pub async fn rank_candidates_handler(
    State(state): State<HandlerState>,
    payload: Result<Json<RankCandidatesRequest>, JsonRejection>,
) -> Result<Json<RankingOutcome>, GatewayError> {
    let Json(payload) = payload?;
    let candidates = payload
        .into_candidates()
        .map_err(GatewayError::invalid_request)?;

    let outcome = state.ranking.rank_batch(candidates).await?;
    Ok(Json(outcome))
}

#[instrument(skip(state))]
pub async fn health_handler(State(state): State<HandlerState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: state.service_name.to_string(),
        version: state.version,
    })
}

#[instrument(skip(state))]
pub async fn root_handler(State(state): State<HandlerState>) -> Json<InfoResponse> {
    Json(InfoResponse {
        message: format!("Welcome to {}", state.service_name),
        version: state.version,
        health: "/health",
    })
}

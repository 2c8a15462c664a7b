//! Wire types for the scoring routes and their boundary validation.
//!
//! Shape errors are left to serde (and surface as 422); everything here is a domain rule
//! and surfaces as 400 with one [`FieldError`] per violation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::constants::{
    MAX_ANSWER_CHARS, MAX_BATCH_SIZE, MAX_CANDIDATE_ID_CHARS, MAX_CONTEXT_CHARS,
    MAX_QUESTION_CHARS,
};
use crate::ranking::{CandidateInput, CandidateMetadata};
use crate::scoring::ScoringRequest;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Body of `POST /evaluate-answer`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateAnswerRequest {
    #[serde(alias = "answer_text")]
    pub candidate_answer: String,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
}

impl EvaluateAnswerRequest {
    pub fn into_scoring_request(self) -> Result<ScoringRequest, Vec<FieldError>> {
        let mut errors = Vec::new();

        let answer = validate_answer("candidate_answer", &self.candidate_answer, &mut errors);
        let question = validate_optional(
            "question",
            self.question.as_deref(),
            MAX_QUESTION_CHARS,
            &mut errors,
        );
        let context = validate_optional(
            "context",
            self.context.as_deref(),
            MAX_CONTEXT_CHARS,
            &mut errors,
        );

        match answer {
            Some(answer) if errors.is_empty() => Ok(ScoringRequest::new(answer, question, context)),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidatePayload {
    pub id: String,
    #[serde(alias = "answer_text")]
    pub answer: String,
    #[serde(default)]
    pub metadata: Option<CandidateMetadata>,
}

/// Body of `POST /rank-candidates`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankCandidatesRequest {
    pub candidates: Vec<CandidatePayload>,
}

impl RankCandidatesRequest {
    pub fn into_candidates(self) -> Result<Vec<CandidateInput>, Vec<FieldError>> {
        let mut errors = Vec::new();

        let count = self.candidates.len();
        if count == 0 {
            errors.push(FieldError::new(
                "candidates",
                "at least one candidate is required",
            ));
        } else if count > MAX_BATCH_SIZE {
            errors.push(FieldError::new(
                "candidates",
                format!("at most {MAX_BATCH_SIZE} candidates are allowed, got {count}"),
            ));
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        let mut seen = HashSet::with_capacity(count);
        let mut inputs = Vec::with_capacity(count);

        for (index, candidate) in self.candidates.into_iter().enumerate() {
            let id_field = format!("candidates[{index}].id");
            let id_len = candidate.id.chars().count();
            if candidate.id.trim().is_empty() {
                errors.push(FieldError::new(&id_field, "must not be empty"));
            } else if id_len > MAX_CANDIDATE_ID_CHARS {
                errors.push(FieldError::new(
                    &id_field,
                    format!("must be at most {MAX_CANDIDATE_ID_CHARS} characters, got {id_len}"),
                ));
            } else if !seen.insert(candidate.id.clone()) {
                errors.push(FieldError::new(
                    &id_field,
                    format!("duplicate candidate id: {}", candidate.id),
                ));
            }

            let answer = validate_answer(
                &format!("candidates[{index}].answer"),
                &candidate.answer,
                &mut errors,
            );

            if let Some(answer) = answer {
                inputs.push(CandidateInput {
                    id: candidate.id,
                    answer,
                    metadata: candidate.metadata,
                });
            }
        }

        if errors.is_empty() {
            Ok(inputs)
        } else {
            Err(errors)
        }
    }
}

/// Trims the answer; rejects blank or overlong text.
fn validate_answer(field: &str, raw: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    let len = raw.chars().count();
    if len > MAX_ANSWER_CHARS {
        errors.push(FieldError::new(
            field,
            format!("must be at most {MAX_ANSWER_CHARS} characters, got {len}"),
        ));
        return None;
    }

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        errors.push(FieldError::new(
            field,
            "answer cannot be empty or whitespace only",
        ));
        return None;
    }

    Some(trimmed.to_string())
}

/// Blank optional text becomes `None`; overlong text is an error.
fn validate_optional(
    field: &str,
    raw: Option<&str>,
    max_chars: usize,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    let value = raw.map(str::trim).filter(|value| !value.is_empty())?;

    let len = value.chars().count();
    if len > max_chars {
        errors.push(FieldError::new(
            field,
            format!("must be at most {max_chars} characters, got {len}"),
        ));
        return None;
    }

    Some(value.to_string())
}

//! Extraction and validation of the model's free-text reply.
//!
//! The model is asked for a bare JSON object but may wrap it in Markdown fences or prose.
//! The first position from which a complete JSON object deserializes wins; a real parser
//! is used so nested objects and braces inside strings do not confuse the scan.

use serde_json::{Map, Value};

use super::error::{ScoringError, ScoringResult};
use super::types::ScoreResult;
use crate::constants::{MAX_FEEDBACK_CHARS, MAX_SCORE, MIN_SCORE};

/// Extracts the first JSON object from `reply` and validates it as a [`ScoreResult`].
pub fn parse_score_reply(reply: &str) -> ScoringResult<ScoreResult> {
    let cleaned = strip_code_fences(reply);
    let object = first_json_object(&cleaned).ok_or_else(|| {
        ScoringError::parse(format!(
            "no JSON object found in reply ({} chars)",
            reply.chars().count()
        ))
    })?;

    validate_score_object(&object)
}

/// Replaces each Markdown fence marker (```` ``` ```` plus an optional language tag) with a
/// space. Markers may share a line with the payload, so only the marker itself is removed.
pub(crate) fn strip_code_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find("```") {
        out.push_str(&rest[..pos]);
        out.push(' ');
        let after = &rest[pos + 3..];
        let tag_len = after
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(after.len());
        rest = &after[tag_len..];
    }
    out.push_str(rest);

    out.trim().to_string()
}

pub(crate) fn first_json_object(text: &str) -> Option<Map<String, Value>> {
    text.match_indices('{').find_map(|(start, _)| {
        let mut stream = serde_json::Deserializer::from_str(&text[start..]).into_iter::<Value>();
        match stream.next() {
            Some(Ok(Value::Object(map))) => Some(map),
            _ => None,
        }
    })
}

pub(crate) fn validate_score_object(object: &Map<String, Value>) -> ScoringResult<ScoreResult> {
    let score = match object.get("score") {
        None => return Err(ScoringError::schema("missing required field: score")),
        Some(Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| ScoringError::schema(format!("score must be an integer, got {n}")))?,
        Some(other) => {
            return Err(ScoringError::schema(format!(
                "score must be an integer, got {other}"
            )));
        }
    };

    if score < i64::from(MIN_SCORE) || score > i64::from(MAX_SCORE) {
        return Err(ScoringError::schema(format!(
            "invalid score value: {score}; must be an integer {MIN_SCORE}-{MAX_SCORE}"
        )));
    }

    let summary = feedback_field(object, "summary")?;
    let improvement = feedback_field(object, "improvement")?;

    Ok(ScoreResult {
        score: score as u8,
        summary,
        improvement,
    })
}

fn feedback_field(object: &Map<String, Value>, name: &str) -> ScoringResult<String> {
    let raw = match object.get(name) {
        None => {
            return Err(ScoringError::schema(format!(
                "missing required field: {name}"
            )));
        }
        Some(Value::String(s)) => s.trim(),
        Some(_) => return Err(ScoringError::schema(format!("{name} must be a string"))),
    };

    if raw.is_empty() {
        return Err(ScoringError::schema(format!(
            "{name} must be a non-empty string"
        )));
    }

    let len = raw.chars().count();
    if len > MAX_FEEDBACK_CHARS {
        return Err(ScoringError::schema(format!(
            "{name} is {len} chars; limit is {MAX_FEEDBACK_CHARS}"
        )));
    }

    Ok(raw.to_string())
}

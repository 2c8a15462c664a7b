//! Provider-backed scorer using the `genai` multi-provider client.

use std::time::Duration;

use async_trait::async_trait;
use genai::Client;
use genai::chat::{ChatMessage, ChatOptions, ChatRequest};
use tracing::{debug, error, instrument};

use super::error::{ScoringError, ScoringResult};
use super::parse::parse_score_reply;
use super::scorer::AnswerScorer;
use super::types::{ScoreResult, ScoringRequest};

const SYSTEM_PROMPT: &str = "You are an expert technical interviewer evaluating candidate responses. \
Your task is to provide a fair, objective assessment.";

// genai's ChatOptions has no top-k setting, so sampling is bounded by top-p alone.
const TEMPERATURE: f64 = 0.3;
const TOP_P: f64 = 0.95;
const MAX_OUTPUT_TOKENS: u32 = 1024;

/// Scores answers through a chat model; the provider is resolved by `genai` from the model
/// name and credentials come from the provider's usual environment variable.
#[derive(Clone)]
pub struct GenAiScorer {
    client: Client,
    model: String,
    timeout: Duration,
    options: ChatOptions,
}

impl std::fmt::Debug for GenAiScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenAiScorer")
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GenAiScorer {
    pub fn new(model: impl Into<String>, timeout: Duration) -> Self {
        Self::with_client(Client::default(), model, timeout)
    }

    pub fn with_client(client: Client, model: impl Into<String>, timeout: Duration) -> Self {
        let options = ChatOptions::default()
            .with_temperature(TEMPERATURE)
            .with_top_p(TOP_P)
            .with_max_tokens(MAX_OUTPUT_TOKENS);

        Self {
            client,
            model: model.into(),
            timeout,
            options,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn chat_options(&self) -> &ChatOptions {
        &self.options
    }
}

#[async_trait]
impl AnswerScorer for GenAiScorer {
    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn score(&self, request: &ScoringRequest) -> ScoringResult<ScoreResult> {
        let prompt = build_evaluation_prompt(request);
        debug!(prompt_len = prompt.len(), "Sending evaluation request to provider");

        let chat_req = ChatRequest::new(vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(prompt),
        ]);

        let call = self
            .client
            .exec_chat(&self.model, chat_req, Some(&self.options));

        let response = match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                error!("Provider error: {}", e);
                return Err(ScoringError::upstream(e.to_string()));
            }
            Err(_) => {
                error!(timeout_ms = self.timeout.as_millis() as u64, "Provider call timed out");
                return Err(ScoringError::upstream(format!(
                    "timed out after {:?}",
                    self.timeout
                )));
            }
        };

        let text = response.first_text().unwrap_or_default();
        debug!(reply_len = text.len(), "Received provider reply");

        parse_score_reply(text)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Builds the user prompt: optional context and question, the quoted answer, the scoring
/// guide, and the strict output contract.
pub fn build_evaluation_prompt(request: &ScoringRequest) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(16);

    if let Some(context) = &request.context {
        parts.push(format!("Context: {context}\n"));
    }
    if let Some(question) = &request.question {
        parts.push(format!("Question Asked: {question}\n"));
    }

    parts.push(format!(
        "Candidate's Answer: \"{}\"\n",
        request.answer_text
    ));
    parts.extend(
        [
            "Evaluate this answer and provide your assessment in STRICT JSON format.\n",
            "Scoring Guide:",
            "- 5: Exceptional - comprehensive, accurate, well-structured with depth",
            "- 4: Good - correct understanding with minor gaps, solid explanation",
            "- 3: Adequate - shows basic understanding but lacks depth or has minor errors",
            "- 2: Weak - significant gaps in understanding or multiple errors",
            "- 1: Poor - incorrect, irrelevant, or completely missing the point\n",
            "Return ONLY a valid JSON object with this EXACT structure (no markdown, no code blocks, no additional text):",
            "{",
            "  \"score\": <integer 1-5>,",
            "  \"summary\": \"<one concise sentence summarizing the answer quality>\",",
            "  \"improvement\": \"<one specific, actionable suggestion for improvement>\"",
            "}",
        ]
        .into_iter()
        .map(String::from),
    );

    parts.join("\n")
}

//! Document summarization through the Gemini `generateContent` endpoint.
//!
//! One request per call. There is no retry, batching or caching; the only
//! prompt engineering is the fixed instruction prefix and the
//! [`MAX_PROMPT_CHARS`] cutoff applied by [`build_prompt`].

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Public Gemini API host.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Number of document characters sent after the instructions.
pub const MAX_PROMPT_CHARS: usize = 15_000;

/// Fixed instruction text that precedes the document in every prompt.
pub const SUMMARY_INSTRUCTIONS: &str = "Summarize the following document clearly and concisely. \
Highlight key ideas, important names, and any factual details. \
Make it structured, readable, and professional.\n\n";

/// Build the summarization prompt: the instructions followed by the first
/// [`MAX_PROMPT_CHARS`] characters of `full_text`, unaltered.
pub fn build_prompt(full_text: &str) -> String {
    // Cut on a char boundary, counting Unicode scalar values rather than bytes
    let cutoff = full_text
        .char_indices()
        .nth(MAX_PROMPT_CHARS)
        .map(|(i, _)| i)
        .unwrap_or(full_text.len());
    format!("{}{}", SUMMARY_INSTRUCTIONS, &full_text[..cutoff])
}

#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("no API key configured (set GEMINI_API_KEY or GOOGLE_API_KEY)")]
    MissingApiKey,
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API returned HTTP {status}: {message}")]
    Api { status: u16, message: String },
    #[error("response contained no summary text")]
    EmptyResponse,
}

/// A text-completion service that turns a prompt into a summary.
pub trait Summarizer: Send + Sync {
    /// Send `prompt` and return the response text.
    fn summarize<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, SummarizeError>> + Send + 'a>>;
}

/// Summarize a whole document: build the prompt and issue exactly one call.
pub async fn summarize_document(
    summarizer: &dyn Summarizer,
    full_text: &str,
) -> Result<String, SummarizeError> {
    let prompt = build_prompt(full_text);
    summarizer.summarize(&prompt).await
}

/// Settings for [`GeminiClient`].
#[derive(Debug, Clone)]
pub struct SummaryConfig {
    pub model: String,
    /// Resolved once at startup; `None` fails at call time.
    pub api_key: Option<String>,
    pub base_url: String,
    /// `None` waits for the server indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }
}

/// reqwest-based [`Summarizer`] for the Gemini REST API.
pub struct GeminiClient {
    client: reqwest::Client,
    config: SummaryConfig,
}

impl GeminiClient {
    pub fn new(config: SummaryConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Reuse an existing HTTP client (connection pool).
    pub fn with_client(client: reqwest::Client, config: SummaryConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &SummaryConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn transport_error(&self, err: reqwest::Error) -> SummarizeError {
        match self.config.timeout {
            Some(timeout) if err.is_timeout() => SummarizeError::Timeout(timeout),
            _ => SummarizeError::Http(err),
        }
    }
}

impl Summarizer for GeminiClient {
    fn summarize<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, SummarizeError>> + Send + 'a>> {
        Box::pin(async move {
            let api_key = self
                .config
                .api_key
                .as_deref()
                .ok_or(SummarizeError::MissingApiKey)?;

            tracing::debug!(
                model = %self.config.model,
                prompt_chars = prompt.chars().count(),
                "requesting summary"
            );

            let mut request = self
                .client
                .post(self.endpoint())
                .header("x-goog-api-key", api_key)
                .json(&GenerateRequest::new(prompt));
            if let Some(timeout) = self.config.timeout {
                request = request.timeout(timeout);
            }

            let resp = request.send().await.map_err(|e| self.transport_error(e))?;

            let status = resp.status();
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                let message = api_error_message(&body).unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown error")
                        .to_string()
                });
                tracing::warn!(status = status.as_u16(), error = %message, "summary request failed");
                return Err(SummarizeError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let data: GenerateResponse = resp.json().await.map_err(|e| self.transport_error(e))?;
            let text = data.into_text().ok_or(SummarizeError::EmptyResponse)?;

            tracing::info!(model = %self.config.model, chars = text.len(), "summary received");
            Ok(text)
        })
    }
}

// ── Wire types ─────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> GenerateRequest<'a> {
    fn new(prompt: &'a str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate, if any text is present.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Pull the human-readable message out of a Google API error body.
fn api_error_message(body: &str) -> Option<String> {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return Some(envelope.error.message);
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

use serde::{Deserialize, Serialize};

pub mod backend;
pub mod config_file;
pub mod credentials;
pub mod summarize;

// Re-export for convenience
pub use backend::{BackendError, PdfBackend};
pub use credentials::resolve_api_key;
pub use summarize::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS, GeminiClient, MAX_PROMPT_CHARS,
    SUMMARY_INSTRUCTIONS, SummarizeError, Summarizer, SummaryConfig, build_prompt,
    summarize_document,
};

/// One headed section detected in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// The heading line, trimmed.
    pub title: String,
    /// Every body line under the heading, space-joined and trimmed.
    pub body: String,
}

/// Result of segmenting a document into topics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicExtraction {
    /// Topics in document order.
    pub topics: Vec<Topic>,
    /// The page strings joined with `\n`, untouched by segmentation.
    pub full_text: String,
}

impl TopicExtraction {
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

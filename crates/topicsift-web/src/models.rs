use serde::{Deserialize, Serialize};
use topicsift_core::{Topic, TopicExtraction};

/// Response of `POST /extract`.
///
/// `full_text` goes back to the browser so the summarize action can be
/// retried without uploading the file again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub filename: String,
    pub topic_count: usize,
    pub topics: Vec<Topic>,
    pub full_text: String,
}

impl ExtractResponse {
    pub fn new(filename: String, extraction: TopicExtraction) -> Self {
        Self {
            filename,
            topic_count: extraction.topics.len(),
            topics: extraction.topics,
            full_text: extraction.full_text,
        }
    }
}

/// Body of `POST /summarize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

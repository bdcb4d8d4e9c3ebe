use std::path::Path;

use thiserror::Error;

pub mod config;
pub mod extractor;
pub mod heading;
pub mod segment;

pub use config::{DEFAULT_MAX_HEADING_WORDS, SegmenterConfig, SegmenterConfigBuilder};
pub use extractor::TopicExtractor;
pub use heading::{has_heading_charset, is_heading_candidate, within_word_limit};
pub use segment::{content_lines, segment_pages, segment_text};
// Re-export domain types from core (canonical definitions live there)
pub use topicsift_core::{BackendError, PdfBackend, Topic, TopicExtraction};

#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("backend error: {0}")]
    Backend(#[from] topicsift_core::BackendError),
}

/// Extract topics from a PDF file using the given backend for text extraction.
///
/// Pipeline:
/// 1. Extract one text string per page via `backend`
/// 2. Join pages with newlines into the full text
/// 3. Split into trimmed, non-blank lines and classify each as heading or body
/// 4. Group body lines under the preceding heading
pub fn extract_topics(
    pdf_path: &Path,
    backend: &dyn PdfBackend,
) -> Result<TopicExtraction, ParsingError> {
    TopicExtractor::new().extract_via_backend(pdf_path, backend)
}

use std::path::Path;

use topicsift_core::{PdfBackend, Topic, TopicExtraction};

use crate::ParsingError;
use crate::config::SegmenterConfig;
use crate::{heading, segment};

/// A configurable topic extraction pipeline.
///
/// Holds a [`SegmenterConfig`] and exposes each pipeline step as a method.
/// The default constructor uses built-in defaults; use
/// [`TopicExtractor::with_config`] to supply a custom heading pattern or
/// word limit.
pub struct TopicExtractor {
    config: SegmenterConfig,
}

impl Default for TopicExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TopicExtractor {
    /// Create an extractor with default configuration.
    pub fn new() -> Self {
        Self {
            config: SegmenterConfig::default(),
        }
    }

    /// Create an extractor with a custom configuration.
    pub fn with_config(config: SegmenterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Classify a single trimmed line.
    pub fn is_heading(&self, line: &str) -> bool {
        heading::is_heading_candidate_with_config(line, &self.config)
    }

    /// Segment already-joined document text.
    pub fn segment_text(&self, text: &str) -> Vec<Topic> {
        segment::segment_text_with_config(text, &self.config)
    }

    /// Join page strings and segment them.
    pub fn segment_pages<S: AsRef<str>>(&self, pages: &[S]) -> TopicExtraction {
        segment::segment_pages_with_config(pages, &self.config)
    }

    /// Run the full pipeline: extract pages with `backend`, then segment.
    pub fn extract_via_backend(
        &self,
        pdf_path: &Path,
        backend: &dyn PdfBackend,
    ) -> Result<TopicExtraction, ParsingError> {
        let pages = backend.extract_pages(pdf_path)?;
        tracing::debug!(path = %pdf_path.display(), pages = pages.len(), "extracted PDF text");

        let extraction = self.segment_pages(&pages);
        tracing::info!(
            path = %pdf_path.display(),
            topics = extraction.topics.len(),
            chars = extraction.full_text.len(),
            "segmented document"
        );
        Ok(extraction)
    }
}

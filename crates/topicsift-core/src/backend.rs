use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for PDF text extraction backends.
///
/// Implementors provide the low-level text extraction step; topic
/// segmentation lives in `topicsift_parsing::TopicExtractor`.
pub trait PdfBackend: Send + Sync {
    /// Extract the text of every page, one string per page, in page order.
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>, BackendError>;
}

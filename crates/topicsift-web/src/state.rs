use std::sync::Arc;

use topicsift_core::{PdfBackend, Summarizer};
use topicsift_parsing::SegmenterConfig;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub backend: Arc<dyn PdfBackend>,
    pub summarizer: Arc<dyn Summarizer>,
    pub segmenter: SegmenterConfig,
    /// Model name shown on the index page.
    pub model: String,
}

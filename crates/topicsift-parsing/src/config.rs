use regex::Regex;

/// Default maximum number of whitespace-separated words in a heading.
pub const DEFAULT_MAX_HEADING_WORDS: usize = 8;

/// Configuration for heading detection.
///
/// `heading_re` is `None` for the built-in uppercase heading pattern.
/// Use [`SegmenterConfigBuilder`] to construct from string patterns.
#[derive(Debug, Clone)]
pub struct SegmenterConfig {
    /// Regex a trimmed line must match to count as a heading.
    pub(crate) heading_re: Option<Regex>,
    /// Maximum word count for a heading (default: 8).
    pub(crate) max_heading_words: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            heading_re: None,
            max_heading_words: DEFAULT_MAX_HEADING_WORDS,
        }
    }
}

impl SegmenterConfig {
    pub fn max_heading_words(&self) -> usize {
        self.max_heading_words
    }
}

/// Builder for [`SegmenterConfig`].
///
/// Accepts a string pattern that is compiled in [`build()`](Self::build).
/// Fails fast with `regex::Error` if the pattern is invalid.
#[derive(Debug, Clone, Default)]
pub struct SegmenterConfigBuilder {
    heading_pattern: Option<String>,
    max_heading_words: Option<usize>,
}

impl SegmenterConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the heading pattern. The pattern should be anchored at both
    /// ends; it is matched against the trimmed line.
    pub fn heading_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.heading_pattern = Some(pattern.into());
        self
    }

    pub fn max_heading_words(mut self, n: usize) -> Self {
        self.max_heading_words = Some(n);
        self
    }

    pub fn build(self) -> Result<SegmenterConfig, regex::Error> {
        let heading_re = self
            .heading_pattern
            .as_deref()
            .map(Regex::new)
            .transpose()?;
        Ok(SegmenterConfig {
            heading_re,
            max_heading_words: self
                .max_heading_words
                .unwrap_or(DEFAULT_MAX_HEADING_WORDS),
        })
    }
}

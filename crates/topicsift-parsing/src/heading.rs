//! Heading classification for single trimmed lines.
//!
//! A line is a heading candidate when it passes both checks:
//! 1. [`has_heading_charset`]: uppercase letters, whitespace, digits and
//!    `. ' - : ,` only, starting with an uppercase letter;
//! 2. [`within_word_limit`]: at most [`DEFAULT_MAX_HEADING_WORDS`] words.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{DEFAULT_MAX_HEADING_WORDS, SegmenterConfig};

static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Z\s.'\-:,0-9]+$").unwrap());

/// True if every character of `line` is in the heading character class and
/// the line starts with an uppercase letter.
///
/// Expects an already trimmed line.
pub fn has_heading_charset(line: &str) -> bool {
    HEADING_RE.is_match(line)
}

/// True if `line` splits into at most `max_words` whitespace-separated words.
pub fn within_word_limit(line: &str, max_words: usize) -> bool {
    line.split_whitespace().count() <= max_words
}

/// Classify a trimmed line with the default rules.
pub fn is_heading_candidate(line: &str) -> bool {
    has_heading_charset(line) && within_word_limit(line, DEFAULT_MAX_HEADING_WORDS)
}

/// Config-aware version of [`is_heading_candidate`].
pub(crate) fn is_heading_candidate_with_config(line: &str, config: &SegmenterConfig) -> bool {
    let charset_ok = match &config.heading_re {
        Some(re) => re.is_match(line),
        None => has_heading_charset(line),
    };
    charset_ok && within_word_limit(line, config.max_heading_words)
}

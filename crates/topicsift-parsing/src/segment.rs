use topicsift_core::{Topic, TopicExtraction};

use crate::config::SegmenterConfig;
use crate::heading::is_heading_candidate_with_config;

/// Line boundaries recognised when splitting extracted text.
///
/// PDF text often carries form feeds and Unicode separators besides `\n`.
fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\u{0B}'
            | '\u{0C}'
            | '\u{1C}'
            | '\u{1D}'
            | '\u{1E}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Split text into trimmed, non-blank lines.
pub fn content_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_line_boundary)
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

/// Join page strings and segment the result into topics.
pub fn segment_pages<S: AsRef<str>>(pages: &[S]) -> TopicExtraction {
    segment_pages_with_config(pages, &SegmenterConfig::default())
}

/// Config-aware version of [`segment_pages`].
pub fn segment_pages_with_config<S: AsRef<str>>(
    pages: &[S],
    config: &SegmenterConfig,
) -> TopicExtraction {
    let full_text = pages
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n");
    let topics = segment_text_with_config(&full_text, config);
    TopicExtraction { topics, full_text }
}

/// Split document text into headed topics.
///
/// Single forward pass over the non-blank lines:
/// - a heading closes the open topic, which is emitted only if it collected
///   at least one body line, then opens a new one;
/// - a body line is appended to the open topic, or dropped if no heading
///   has been seen yet;
/// - at the end, the open topic is emitted only if its body is non-empty.
///
/// A heading on the last line of the document is therefore never emitted,
/// and of two back-to-back headings only the second can survive.
pub fn segment_text(text: &str) -> Vec<Topic> {
    segment_text_with_config(text, &SegmenterConfig::default())
}

/// Config-aware version of [`segment_text`].
pub fn segment_text_with_config(text: &str, config: &SegmenterConfig) -> Vec<Topic> {
    let mut topics = Vec::new();
    let mut current_title: Option<&str> = None;
    let mut body: Vec<&str> = Vec::new();

    for line in content_lines(text) {
        if is_heading_candidate_with_config(line, config) {
            if let Some(title) = current_title
                && !body.is_empty()
            {
                topics.push(finalize(title, &body));
            }
            body.clear();
            current_title = Some(line);
        } else if current_title.is_some() {
            body.push(line);
        }
    }

    if let Some(title) = current_title
        && !body.is_empty()
    {
        topics.push(finalize(title, &body));
    }

    topics
}

fn finalize(title: &str, body: &[&str]) -> Topic {
    Topic {
        title: title.trim().to_string(),
        body: body.join(" ").trim().to_string(),
    }
}

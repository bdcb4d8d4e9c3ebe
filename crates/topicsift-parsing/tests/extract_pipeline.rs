//! End-to-end tests for [`extract_topics`] with an in-memory backend.

use std::path::Path;

use topicsift_parsing::{
    BackendError, PdfBackend, SegmenterConfigBuilder, Topic, TopicExtractor, extract_topics,
};

/// Backend that ignores the path and returns fixed pages.
struct FixedPages(Vec<String>);

impl PdfBackend for FixedPages {
    fn extract_pages(&self, _path: &Path) -> Result<Vec<String>, BackendError> {
        Ok(self.0.clone())
    }
}

/// Backend that always fails to open the document.
struct Corrupt;

impl PdfBackend for Corrupt {
    fn extract_pages(&self, _path: &Path) -> Result<Vec<String>, BackendError> {
        Err(BackendError::OpenError("not a PDF".into()))
    }
}

fn pages(p: &[&str]) -> FixedPages {
    FixedPages(p.iter().map(|s| s.to_string()).collect())
}

#[test]
fn extracts_topics_across_pages() -> anyhow::Result<()> {
    let backend = pages(&[
        "Journal of Things\nINTRODUCTION\nWe study things.\n",
        "METHODS\nWe looked closely.\nThen we wrote it down.\nCONCLUSION\n",
    ]);

    let result = extract_topics(Path::new("paper.pdf"), &backend)?;

    assert_eq!(
        result.topics,
        vec![
            Topic {
                title: "INTRODUCTION".into(),
                body: "We study things.".into(),
            },
            Topic {
                title: "METHODS".into(),
                body: "We looked closely. Then we wrote it down.".into(),
            },
        ]
    );
    assert_eq!(
        result.full_text,
        "Journal of Things\nINTRODUCTION\nWe study things.\n\nMETHODS\nWe looked closely.\nThen we wrote it down.\nCONCLUSION\n"
    );
    Ok(())
}

#[test]
fn backend_failure_propagates() {
    let err = extract_topics(Path::new("broken.pdf"), &Corrupt).unwrap_err();
    assert!(err.to_string().contains("not a PDF"), "{err}");
}

#[test]
fn headingless_document_is_not_an_error() -> anyhow::Result<()> {
    let backend = pages(&["plain prose only", "on two pages"]);
    let result = extract_topics(Path::new("prose.pdf"), &backend)?;
    assert!(result.is_empty());
    assert_eq!(result.full_text, "plain prose only\non two pages");
    Ok(())
}

#[test]
fn custom_config_changes_classification() -> anyhow::Result<()> {
    let config = SegmenterConfigBuilder::new()
        .heading_pattern(r"^\d+\. [A-Z][a-z]+$")
        .build()?;
    let extractor = TopicExtractor::with_config(config);
    let backend = pages(&["1. Introduction\nHello.\n2. Method\nWorld."]);

    let result = extractor.extract_via_backend(Path::new("numbered.pdf"), &backend)?;

    let titles: Vec<_> = result.topics.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["1. Introduction", "2. Method"]);
    Ok(())
}

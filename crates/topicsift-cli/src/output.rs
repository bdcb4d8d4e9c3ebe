use std::io::Write;

use owo_colors::OwoColorize;
use topicsift_core::Topic;

/// Shown in place of an empty topic body.
pub const EMPTY_BODY_PLACEHOLDER: &str = "(No content found under this heading)";

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the header line after a document has been segmented.
pub fn print_extraction_summary(
    w: &mut dyn Write,
    pdf_name: &str,
    topic_count: usize,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w, "Extracting topics from {}...", pdf_name)?;
    if topic_count == 0 {
        let msg = "No recognizable topics found. Try a structured document with clear headings.";
        if color.enabled() {
            writeln!(w, "{}", msg.yellow())?;
        } else {
            writeln!(w, "{}", msg)?;
        }
    } else if color.enabled() {
        writeln!(
            w,
            "{}",
            format!("Extracted {} topics successfully!", topic_count).green()
        )?;
    } else {
        writeln!(w, "Extracted {} topics successfully!", topic_count)?;
    }
    writeln!(w)?;
    Ok(())
}

/// Print every topic as a numbered title followed by its indented body.
pub fn print_topics(w: &mut dyn Write, topics: &[Topic], color: ColorMode) -> std::io::Result<()> {
    for (i, topic) in topics.iter().enumerate() {
        let heading = format!("{}. {}", i + 1, topic.title);
        if color.enabled() {
            writeln!(w, "{}", heading.bold().cyan())?;
        } else {
            writeln!(w, "{}", heading)?;
        }

        if topic.body.is_empty() {
            if color.enabled() {
                writeln!(w, "  {}", EMPTY_BODY_PLACEHOLDER.dimmed())?;
            } else {
                writeln!(w, "  {}", EMPTY_BODY_PLACEHOLDER)?;
            }
        } else {
            writeln!(w, "  {}", topic.body)?;
        }
        writeln!(w)?;
    }
    Ok(())
}

/// Print the generated summary under a section header.
pub fn print_summary(w: &mut dyn Write, summary: &str, color: ColorMode) -> std::io::Result<()> {
    let sep = "-".repeat(60);
    writeln!(w, "{}", sep)?;
    if color.enabled() {
        writeln!(w, "{}", "AI-Generated Summary".bold())?;
    } else {
        writeln!(w, "AI-Generated Summary")?;
    }
    writeln!(w, "{}", sep)?;
    writeln!(w)?;
    writeln!(w, "{}", summary.trim_end())?;
    Ok(())
}

/// Print a summarization failure. Topics printed earlier stay on screen.
pub fn print_summary_error(
    w: &mut dyn Write,
    message: &str,
    color: ColorMode,
) -> std::io::Result<()> {
    let line = format!("Gemini API Error: {}", message);
    if color.enabled() {
        writeln!(w, "{}", line.red())?;
    } else {
        writeln!(w, "{}", line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: ColorMode = ColorMode(false);

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut dyn Write) -> std::io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn topics_are_numbered_in_order() {
        let topics = vec![
            Topic {
                title: "INTRODUCTION".into(),
                body: "Hello.".into(),
            },
            Topic {
                title: "METHODS".into(),
                body: "World.".into(),
            },
        ];
        let out = render(|w| print_topics(w, &topics, PLAIN));
        assert_eq!(out, "1. INTRODUCTION\n  Hello.\n\n2. METHODS\n  World.\n\n");
    }

    #[test]
    fn empty_body_uses_placeholder() {
        let topics = vec![Topic {
            title: "APPENDIX".into(),
            body: String::new(),
        }];
        let out = render(|w| print_topics(w, &topics, PLAIN));
        assert!(out.contains(EMPTY_BODY_PLACEHOLDER));
    }

    #[test]
    fn zero_topics_warns() {
        let out = render(|w| print_extraction_summary(w, "doc.pdf", 0, PLAIN));
        assert!(out.contains("No recognizable topics found"));
    }

    #[test]
    fn topic_count_reported() {
        let out = render(|w| print_extraction_summary(w, "doc.pdf", 3, PLAIN));
        assert!(out.contains("Extracted 3 topics successfully!"));
    }

    #[test]
    fn summary_error_is_prefixed() {
        let out = render(|w| print_summary_error(w, "quota exceeded", PLAIN));
        assert_eq!(out, "Gemini API Error: quota exceeded\n");
    }
}

use std::path::Path;

use mupdf::{Document, TextPageFlags};

use topicsift_core::{BackendError, PdfBackend};

/// MuPDF-based implementation of [`PdfBackend`].
///
/// This crate isolates the mupdf dependency (AGPL-3.0) so that the
/// segmentation and summarization crates do not transitively depend on it.
///
/// Each page's text is rebuilt from MuPDF's block/line structure, one line
/// per text line, without any layout filtering.
#[derive(Debug, Default, Clone, Copy)]
pub struct MupdfBackend;

impl MupdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PdfBackend for MupdfBackend {
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>, BackendError> {
        if !path.exists() {
            return Err(BackendError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )));
        }

        let path_str = path
            .to_str()
            .ok_or_else(|| BackendError::OpenError("invalid path encoding".into()))?;

        let document =
            Document::open(path_str).map_err(|e| BackendError::OpenError(e.to_string()))?;

        let mut pages_text = Vec::new();

        for page_result in document
            .pages()
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?
        {
            let page = page_result.map_err(|e| BackendError::ExtractionError(e.to_string()))?;
            let text_page = page
                .to_text_page(TextPageFlags::empty())
                .map_err(|e| BackendError::ExtractionError(e.to_string()))?;

            let mut page_text = String::new();
            for block in text_page.blocks() {
                for line in block.lines() {
                    let line_text: String = line
                        .chars()
                        .map(|c| c.char().unwrap_or('\u{FFFD}'))
                        .collect();
                    page_text.push_str(&line_text);
                    page_text.push('\n');
                }
            }
            pages_text.push(page_text);
        }

        tracing::debug!(path = %path.display(), pages = pages_text.len(), "mupdf extraction done");
        Ok(pages_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_io_error() {
        let err = MupdfBackend::new()
            .extract_pages(Path::new("/definitely/not/here.pdf"))
            .unwrap_err();
        assert!(matches!(err, BackendError::Io(_)));
    }

    #[test]
    fn garbage_file_fails_to_open() {
        let dir = std::env::temp_dir().join(format!("topicsift-mupdf-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("garbage.pdf");
        std::fs::write(&path, b"this is not a pdf at all").unwrap();

        let result = MupdfBackend::new().extract_pages(&path);
        let _ = std::fs::remove_dir_all(&dir);

        assert!(result.is_err());
    }
}

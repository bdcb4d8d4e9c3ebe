use axum::extract::Multipart;

/// An uploaded PDF with its data and metadata.
pub struct UploadedFile {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Read the single `pdf` field out of a multipart upload.
pub async fn parse_multipart(mut multipart: Multipart) -> Result<UploadedFile, String> {
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Failed to read form field: {}", e))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "pdf" => {
                let filename = field.file_name().unwrap_or("upload.pdf").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| format!("Failed to read file data: {}", e))?
                    .to_vec();

                check_pdf(&filename, &data)?;

                file = Some(UploadedFile { filename, data });
            }
            _ => {
                // Ignore unknown fields
                let _ = field.bytes().await;
            }
        }
    }

    file.ok_or_else(|| "No file uploaded".to_string())
}

/// Accept only PDFs, by magic bytes.
fn check_pdf(filename: &str, data: &[u8]) -> Result<(), String> {
    if data.starts_with(b"%PDF-") {
        return Ok(());
    }
    if filename.to_lowercase().ends_with(".pdf") {
        return Err("File has .pdf extension but doesn't appear to be a valid PDF".to_string());
    }
    Err("Unsupported file type. Please upload a PDF file.".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_pdf_magic() {
        assert!(check_pdf("paper.pdf", b"%PDF-1.7\n...").is_ok());
        assert!(check_pdf("no-extension", b"%PDF-1.4").is_ok());
    }

    #[test]
    fn rejects_fake_pdf() {
        let err = check_pdf("paper.pdf", b"PK\x03\x04").unwrap_err();
        assert!(err.contains("doesn't appear to be a valid PDF"));
    }

    #[test]
    fn rejects_other_types() {
        let err = check_pdf("notes.txt", b"hello").unwrap_err();
        assert!(err.contains("Unsupported file type"));
    }
}

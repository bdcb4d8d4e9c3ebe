use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use topicsift_parsing::TopicExtractor;

use super::error_response;
use crate::models::ExtractResponse;
use crate::state::AppState;
use crate::upload;

/// Upload a PDF and return its topics plus the full text.
pub async fn extract(State(state): State<Arc<AppState>>, multipart: Multipart) -> Response {
    let file = match upload::parse_multipart(multipart).await {
        Ok(f) => f,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e),
    };
    tracing::info!(filename = %file.filename, bytes = file.data.len(), "received upload");

    let temp_dir = match tempfile::tempdir() {
        Ok(d) => d,
        Err(e) => {
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to create temp directory: {}", e),
            );
        }
    };
    let pdf_path = temp_dir.path().join("upload.pdf");
    if let Err(e) = std::fs::write(&pdf_path, &file.data) {
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to write temp file: {}", e),
        );
    }

    let backend = Arc::clone(&state.backend);
    let config = state.segmenter.clone();
    let joined = tokio::task::spawn_blocking(move || {
        TopicExtractor::with_config(config).extract_via_backend(&pdf_path, backend.as_ref())
    })
    .await;

    match joined {
        Ok(Ok(extraction)) => Json(ExtractResponse::new(file.filename, extraction)).into_response(),
        Ok(Err(e)) => {
            tracing::warn!(filename = %file.filename, error = %e, "extraction failed");
            error_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Error processing the PDF: {}", e),
            )
        }
        Err(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Task join error: {}", e),
        ),
    }
}

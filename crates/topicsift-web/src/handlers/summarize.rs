use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use topicsift_core::summarize_document;

use super::error_response;
use crate::models::{SummarizeRequest, SummarizeResponse};
use crate::state::AppState;

/// Issue one summarization call for the posted document text.
pub async fn summarize(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SummarizeRequest>,
) -> Response {
    if req.text.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "No document text to summarize");
    }

    match summarize_document(state.summarizer.as_ref(), &req.text).await {
        Ok(summary) => Json(SummarizeResponse { summary }).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "summarization failed");
            error_response(StatusCode::BAD_GATEWAY, format!("Gemini API Error: {}", e))
        }
    }
}

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use topicsift_core::GeminiClient;
use topicsift_core::config_file::{self, ConfigFile, SummaryOverrides};
use topicsift_parsing::{SegmenterConfig, SegmenterConfigBuilder};
use topicsift_pdf_mupdf::MupdfBackend;

mod handlers;
mod models;
mod state;
mod template;
mod upload;


use state::AppState;

const DEFAULT_BIND: &str = "0.0.0.0:5001";

/// Upload limit for a single PDF (50MB).
const BODY_LIMIT: usize = 50 * 1024 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let file_config = config_file::load_config();

    // Resolved once at startup; a missing key only fails when a summary is requested
    let summary_config = file_config.resolve_summary_config(SummaryOverrides::default());
    if summary_config.api_key.is_none() {
        tracing::warn!("no GEMINI_API_KEY or GOOGLE_API_KEY set; summaries will fail");
    }
    let model = summary_config.model.clone();

    let state = Arc::new(AppState {
        backend: Arc::new(MupdfBackend::new()),
        summarizer: Arc::new(GeminiClient::new(summary_config)),
        segmenter: segmenter_config(&file_config)?,
        model,
    });

    let addr = bind_addr(std::env::var("TOPICSIFT_BIND").ok(), &file_config)?;

    let app = build_router(state).layer(TraceLayer::new_for_http());

    tracing::info!(%addr, "listening");
    println!("Listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("topicsift_web=info,topicsift_core=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

pub(crate) fn segmenter_config(file: &ConfigFile) -> anyhow::Result<SegmenterConfig> {
    let mut builder = SegmenterConfigBuilder::new();
    if let Some(pattern) = file.heading_pattern() {
        builder = builder.heading_pattern(pattern);
    }
    if let Some(n) = file.max_heading_words() {
        builder = builder.max_heading_words(n);
    }
    builder
        .build()
        .map_err(|e| anyhow::anyhow!("Invalid heading pattern in config: {}", e))
}

/// Resolve the listen address: `TOPICSIFT_BIND` > `[web] bind` > default.
pub(crate) fn bind_addr(env_bind: Option<String>, file: &ConfigFile) -> anyhow::Result<SocketAddr> {
    let bind = env_bind
        .filter(|b| !b.trim().is_empty())
        .or_else(|| file.bind())
        .unwrap_or_else(|| DEFAULT_BIND.to_string());
    bind.parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address {}: {}", bind, e))
}

pub(crate) fn build_router(state: Arc<AppState>) -> axum::Router {
    axum::Router::new()
        .route("/", axum::routing::get(handlers::index::index))
        .route("/extract", axum::routing::post(handlers::extract::extract))
        .route(
            "/summarize",
            axum::routing::post(handlers::summarize::summarize),
        )
        .layer(axum::extract::DefaultBodyLimit::max(BODY_LIMIT))
        .with_state(state)
}

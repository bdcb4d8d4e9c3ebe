use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use topicsift_core::config_file::{self, ConfigFile, SummaryOverrides};
use topicsift_core::{GeminiClient, Summarizer, TopicExtraction, summarize_document};
use topicsift_parsing::{SegmenterConfig, SegmenterConfigBuilder, TopicExtractor};
use topicsift_pdf_mupdf::MupdfBackend;

mod output;

use output::ColorMode;

/// Smart document topic extractor - Split PDFs into headed topics and summarize them
#[derive(Parser, Debug)]
#[command(name = "topicsift", version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the topics detected in a PDF
    Topics {
        /// Path to the PDF file
        file_path: PathBuf,

        /// Print topics as JSON instead of text
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        segmenter: SegmenterArgs,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Path to output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Extract topics, then summarize the document with Gemini
    Summarize {
        /// Path to the PDF file
        file_path: PathBuf,

        /// Gemini model name
        #[arg(long)]
        model: Option<String>,

        /// Gemini API key (defaults to GEMINI_API_KEY, then GOOGLE_API_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Request timeout in seconds (0 disables)
        #[arg(long)]
        timeout: Option<u64>,

        /// Also print the extracted topics before the summary
        #[arg(long)]
        show_topics: bool,

        #[command(flatten)]
        segmenter: SegmenterArgs,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Path to output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args, Debug)]
struct SegmenterArgs {
    /// Regex a trimmed line must match to be treated as a heading
    #[arg(long)]
    heading_pattern: Option<String>,

    /// Maximum number of words in a heading
    #[arg(long)]
    max_heading_words: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let file_config = config_file::load_config();

    match cli.command {
        Command::Topics {
            file_path,
            json,
            segmenter,
            no_color,
            output,
        } => {
            let config = segmenter_config(&segmenter, &file_config)?;
            tracing::debug!(segmenter = ?config, "resolved segmenter settings");
            topics(file_path, json, config, no_color, output)
        }
        Command::Summarize {
            file_path,
            model,
            api_key,
            timeout,
            show_topics,
            segmenter,
            no_color,
            output,
        } => {
            let config = segmenter_config(&segmenter, &file_config)?;
            // Credentials are resolved once here and passed down explicitly
            let summary_config = file_config.resolve_summary_config(SummaryOverrides {
                model,
                api_key,
                timeout_secs: timeout,
            });
            tracing::debug!(
                model = %summary_config.model,
                timeout = ?summary_config.timeout,
                has_api_key = summary_config.api_key.is_some(),
                segmenter = ?config,
                "resolved summary settings"
            );
            let client = GeminiClient::new(summary_config);
            summarize(file_path, config, &client, show_topics, no_color, output).await
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "topicsift=debug,topicsift_core=debug,topicsift_parsing=debug,topicsift_pdf_mupdf=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve segmenter settings: CLI flags > config file > defaults.
fn segmenter_config(args: &SegmenterArgs, file: &ConfigFile) -> anyhow::Result<SegmenterConfig> {
    let mut builder = SegmenterConfigBuilder::new();
    if let Some(pattern) = args
        .heading_pattern
        .clone()
        .or_else(|| file.heading_pattern())
    {
        builder = builder.heading_pattern(pattern);
    }
    if let Some(n) = args.max_heading_words.or_else(|| file.max_heading_words()) {
        builder = builder.max_heading_words(n);
    }
    builder
        .build()
        .map_err(|e| anyhow::anyhow!("Invalid heading pattern: {}", e))
}

fn open_writer(output: &Option<PathBuf>) -> anyhow::Result<Box<dyn Write>> {
    Ok(if let Some(output_path) = output {
        Box::new(std::fs::File::create(output_path)?)
    } else {
        Box::new(std::io::stdout())
    })
}

fn display_name(file_path: &Path) -> String {
    file_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| file_path.display().to_string())
}

fn extract(file_path: &Path, config: SegmenterConfig) -> anyhow::Result<TopicExtraction> {
    if !file_path.exists() {
        anyhow::bail!("File not found: {}", file_path.display());
    }
    TopicExtractor::with_config(config)
        .extract_via_backend(file_path, &MupdfBackend::new())
        .map_err(|e| anyhow::anyhow!("Error processing the PDF: {}", e))
}

fn topics(
    file_path: PathBuf,
    json: bool,
    config: SegmenterConfig,
    no_color: bool,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let extraction = extract(&file_path, config)?;
    let mut writer = open_writer(&output)?;

    if json {
        serde_json::to_writer_pretty(&mut writer, &extraction.topics)?;
        writeln!(writer)?;
        return Ok(());
    }

    let color = ColorMode(!no_color && output.is_none());
    output::print_extraction_summary(
        &mut writer,
        &display_name(&file_path),
        extraction.topics.len(),
        color,
    )?;
    output::print_topics(&mut writer, &extraction.topics, color)?;
    Ok(())
}

async fn summarize(
    file_path: PathBuf,
    config: SegmenterConfig,
    client: &GeminiClient,
    show_topics: bool,
    no_color: bool,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let extraction = extract(&file_path, config)?;
    let mut writer = open_writer(&output)?;
    let color = ColorMode(!no_color && output.is_none());

    report_and_summarize(
        &mut writer,
        &display_name(&file_path),
        &extraction,
        client,
        &client.config().model,
        show_topics,
        color,
    )
    .await
}

/// Print the extraction header, then summarize the document.
///
/// A document without recognizable topics gets the warning only; no
/// summarization request is made for it.
async fn report_and_summarize(
    w: &mut dyn Write,
    pdf_name: &str,
    extraction: &TopicExtraction,
    summarizer: &dyn Summarizer,
    model: &str,
    show_topics: bool,
    color: ColorMode,
) -> anyhow::Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};

    output::print_extraction_summary(w, pdf_name, extraction.topics.len(), color)?;
    if extraction.is_empty() {
        tracing::info!(pdf = pdf_name, "no topics found, skipping summary");
        return Ok(());
    }
    if show_topics {
        output::print_topics(w, &extraction.topics, color)?;
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg} ({elapsed})")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Summarizing document with {}...", model));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let result = summarize_document(summarizer, &extraction.full_text).await;
    spinner.finish_and_clear();

    match result {
        Ok(summary) => {
            output::print_summary(w, &summary, color)?;
            Ok(())
        }
        Err(e) => {
            tracing::debug!(error = ?e, "summarization failed");
            output::print_summary_error(w, &e.to_string(), color)?;
            anyhow::bail!("summarization failed")
        }
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use topicsift_core::config_file::SegmenterSection;
    use topicsift_core::{SummarizeError, Topic};

    use super::*;

    fn args(pattern: Option<&str>, max_words: Option<usize>) -> SegmenterArgs {
        SegmenterArgs {
            heading_pattern: pattern.map(String::from),
            max_heading_words: max_words,
        }
    }

    fn file_with(pattern: Option<&str>, max_words: Option<usize>) -> ConfigFile {
        ConfigFile {
            segmenter: Some(SegmenterSection {
                heading_pattern: pattern.map(String::from),
                max_heading_words: max_words,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn segmenter_flag_pattern_overrides_file() {
        let file = file_with(Some(r"^Chapter \d+$"), None);
        let config = segmenter_config(&args(Some(r"^Part \d+$"), None), &file).unwrap();
        let extractor = TopicExtractor::with_config(config);
        assert!(extractor.is_heading("Part 2"));
        assert!(!extractor.is_heading("Chapter 2"));
    }

    #[test]
    fn segmenter_file_values_apply_without_flags() {
        let file = file_with(Some(r"^Chapter \d+$"), Some(3));
        let config = segmenter_config(&args(None, None), &file).unwrap();
        assert_eq!(config.max_heading_words(), 3);
        assert!(TopicExtractor::with_config(config).is_heading("Chapter 9"));
    }

    #[test]
    fn segmenter_flag_word_limit_overrides_file() {
        let file = file_with(None, Some(3));
        let config = segmenter_config(&args(None, Some(5)), &file).unwrap();
        assert_eq!(config.max_heading_words(), 5);
    }

    #[test]
    fn segmenter_defaults_without_flags_or_file() {
        let config = segmenter_config(&args(None, None), &ConfigFile::default()).unwrap();
        assert_eq!(config.max_heading_words(), 8);
        assert!(TopicExtractor::with_config(config).is_heading("INTRODUCTION"));
    }

    #[test]
    fn invalid_heading_pattern_is_reported() {
        let err = segmenter_config(&args(Some("^[A-Z"), None), &ConfigFile::default())
            .unwrap_err();
        assert!(err.to_string().starts_with("Invalid heading pattern"), "{err}");
    }

    struct CountingSummarizer {
        reply: Result<&'static str, &'static str>,
        calls: AtomicUsize,
    }

    impl CountingSummarizer {
        fn new(reply: Result<&'static str, &'static str>) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Summarizer for CountingSummarizer {
        fn summarize<'a>(
            &'a self,
            _prompt: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<String, SummarizeError>> + Send + 'a>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let reply = self
                .reply
                .map(String::from)
                .map_err(|message| SummarizeError::Api {
                    status: 500,
                    message: message.to_string(),
                });
            Box::pin(async move { reply })
        }
    }

    fn extraction(topics: &[(&str, &str)]) -> TopicExtraction {
        TopicExtraction {
            topics: topics
                .iter()
                .map(|(title, body)| Topic {
                    title: title.to_string(),
                    body: body.to_string(),
                })
                .collect(),
            full_text: "INTRODUCTION\nSome text.".to_string(),
        }
    }

    async fn run(
        extraction: &TopicExtraction,
        summarizer: &CountingSummarizer,
    ) -> (anyhow::Result<()>, String) {
        let mut buf = Vec::new();
        let result = report_and_summarize(
            &mut buf,
            "doc.pdf",
            extraction,
            summarizer,
            "gemini-test",
            false,
            ColorMode(false),
        )
        .await;
        (result, String::from_utf8(buf).unwrap())
    }

    #[tokio::test]
    async fn no_topics_skips_summary_request() {
        let summarizer = CountingSummarizer::new(Ok("unused"));
        let (result, out) = run(&extraction(&[]), &summarizer).await;

        assert!(result.is_ok());
        assert!(out.contains("No recognizable topics found"));
        assert!(!out.contains("AI-Generated Summary"));
        assert_eq!(summarizer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn topics_trigger_one_summary_request() {
        let summarizer = CountingSummarizer::new(Ok("Short summary."));
        let (result, out) = run(&extraction(&[("INTRODUCTION", "Some text.")]), &summarizer).await;

        assert!(result.is_ok());
        assert!(out.contains("Extracted 1 topics successfully!"));
        assert!(out.contains("Short summary."));
        assert_eq!(summarizer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn summary_failure_is_printed_and_fails() {
        let summarizer = CountingSummarizer::new(Err("quota exceeded"));
        let (result, out) = run(&extraction(&[("INTRODUCTION", "Some text.")]), &summarizer).await;

        assert!(result.is_err());
        assert!(out.contains("Gemini API Error:"), "{out}");
        assert!(out.contains("quota exceeded"), "{out}");
    }
}

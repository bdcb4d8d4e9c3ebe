use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::credentials::resolve_api_key_with;
use crate::summarize::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS, SummaryConfig};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub summary: Option<SummarySection>,
    pub segmenter: Option<SegmenterSection>,
    pub web: Option<WebSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummarySection {
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SegmenterSection {
    pub heading_pattern: Option<String>,
    pub max_heading_words: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebSection {
    pub bind: Option<String>,
}

impl ConfigFile {
    pub fn model(&self) -> Option<String> {
        self.summary.as_ref().and_then(|s| s.model.clone())
    }

    pub fn api_key(&self) -> Option<String> {
        self.summary.as_ref().and_then(|s| s.api_key.clone())
    }

    pub fn base_url(&self) -> Option<String> {
        self.summary.as_ref().and_then(|s| s.base_url.clone())
    }

    pub fn timeout_secs(&self) -> Option<u64> {
        self.summary.as_ref().and_then(|s| s.timeout_secs)
    }

    pub fn heading_pattern(&self) -> Option<String> {
        self.segmenter
            .as_ref()
            .and_then(|s| s.heading_pattern.clone())
    }

    pub fn max_heading_words(&self) -> Option<usize> {
        self.segmenter.as_ref().and_then(|s| s.max_heading_words)
    }

    pub fn bind(&self) -> Option<String> {
        self.web.as_ref().and_then(|w| w.bind.clone())
    }
}

/// Command-line values that take precedence over env vars and config files.
#[derive(Debug, Clone, Default)]
pub struct SummaryOverrides {
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl ConfigFile {
    /// Resolve summarization settings: overrides > env vars > config file > defaults.
    ///
    /// The API key follows [`crate::resolve_api_key`]: an explicit value (flag,
    /// then config file) wins over `GEMINI_API_KEY` / `GOOGLE_API_KEY`.
    /// A timeout of `0` disables the request timeout.
    pub fn resolve_summary_config(&self, overrides: SummaryOverrides) -> SummaryConfig {
        self.resolve_summary_config_with(overrides, |name| std::env::var(name).ok())
    }

    /// Same as [`resolve_summary_config`](Self::resolve_summary_config) with
    /// an injectable environment lookup.
    pub fn resolve_summary_config_with<F>(
        &self,
        overrides: SummaryOverrides,
        lookup: F,
    ) -> SummaryConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let model = overrides
            .model
            .or_else(|| lookup("TOPICSIFT_MODEL"))
            .or_else(|| self.model())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let timeout_secs = overrides
            .timeout_secs
            .or_else(|| lookup("TOPICSIFT_TIMEOUT").and_then(|v| v.parse().ok()))
            .or_else(|| self.timeout_secs())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let base_url = lookup("TOPICSIFT_BASE_URL")
            .or_else(|| self.base_url())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let api_key = resolve_api_key_with(overrides.api_key.or_else(|| self.api_key()), &lookup);

        SummaryConfig {
            model,
            api_key,
            base_url,
            timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
        }
    }
}

/// Platform config directory path: `<config_dir>/topicsift/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("topicsift").join("config.toml"))
}

/// Load config by cascading CWD `.topicsift.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".topicsift.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => {
            tracing::debug!(path = %path.display(), "loaded config file");
            Some(config)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        summary: Some(SummarySection {
            model: overlay.model().or_else(|| base.model()),
            api_key: overlay.api_key().or_else(|| base.api_key()),
            base_url: overlay.base_url().or_else(|| base.base_url()),
            timeout_secs: overlay.timeout_secs().or_else(|| base.timeout_secs()),
        }),
        segmenter: Some(SegmenterSection {
            heading_pattern: overlay.heading_pattern().or_else(|| base.heading_pattern()),
            max_heading_words: overlay
                .max_heading_words()
                .or_else(|| base.max_heading_words()),
        }),
        web: Some(WebSection {
            bind: overlay.bind().or_else(|| base.bind()),
        }),
    }
}

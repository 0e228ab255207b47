// src/config.rs
//! Run configuration loaded from TOML, with a few env overrides.
//!
//! Lookup:
//! 1) `$ARTICLE_METRICS_CONFIG` (must exist)
//! 2) `config/article_metrics.toml` (optional; defaults when absent)
//!
//! Then `ARTICLE_METRICS_INPUT`, `ARTICLE_METRICS_OUTPUT` and
//! `ARTICLE_METRICS_CONCURRENCY` override the matching `[batch]` keys.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::ingest::extract::DEFAULT_MIN_WORDS;
use crate::ingest::providers::http::DEFAULT_USER_AGENT;
use crate::lexicon::LexiconPaths;
use crate::tokenize::Tokenizer;

pub const DEFAULT_CONFIG_PATH: &str = "config/article_metrics.toml";

pub const ENV_CONFIG_PATH: &str = "ARTICLE_METRICS_CONFIG";
pub const ENV_INPUT: &str = "ARTICLE_METRICS_INPUT";
pub const ENV_OUTPUT: &str = "ARTICLE_METRICS_OUTPUT";
pub const ENV_CONCURRENCY: &str = "ARTICLE_METRICS_CONCURRENCY";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub lexicon: LexiconPaths,
    pub tokenizer: Tokenizer,
    pub batch: BatchConfig,
    pub http: HttpConfig,
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Per-article texts live here: written when `save_articles` is on, read
    /// back when `offline` is on.
    pub articles_dir: PathBuf,
    pub save_articles: bool,
    pub concurrency: usize,
    pub min_words: usize,
    /// Re-analyze texts already saved in `articles_dir` instead of fetching.
    pub offline: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("Input.xlsx"),
            output: PathBuf::from("Output Data Structure.xlsx"),
            articles_dir: PathBuf::from("articles"),
            save_articles: true,
            concurrency: 4,
            min_words: DEFAULT_MIN_WORDS,
            offline: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub log_format: LogFormat,
    /// When set, a Prometheus snapshot is written here after the run.
    pub metrics_path: Option<PathBuf>,
}

impl BatchConfig {
    /// Directory texts are saved to during a fetch run, if any.
    pub fn save_dir(&self) -> Option<PathBuf> {
        (self.save_articles && !self.offline).then(|| self.articles_dir.clone())
    }
}

impl AppConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        Self::from_toml_str(&data).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let mut cfg: AppConfig = toml::from_str(s)?;
        cfg.sanitize();
        Ok(cfg)
    }

    /// Env path first, then the default file, then built-in defaults.
    pub fn load_default() -> Result<Self> {
        let mut cfg = if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            Self::load_from_file(&pb)?
        } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::load_from_file(DEFAULT_CONFIG_PATH)?
        } else {
            AppConfig::default()
        };
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Some(p) = non_empty_env(ENV_INPUT) {
            self.batch.input = PathBuf::from(p);
        }
        if let Some(p) = non_empty_env(ENV_OUTPUT) {
            self.batch.output = PathBuf::from(p);
        }
        if let Some(n) = parse_concurrency_env(std::env::var(ENV_CONCURRENCY).ok()) {
            self.batch.concurrency = n;
        }
    }

    fn sanitize(&mut self) {
        if self.batch.concurrency == 0 {
            self.batch.concurrency = 1;
        }
        if self.http.timeout_secs == 0 {
            self.http.timeout_secs = HttpConfig::default().timeout_secs;
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

// unparsable or zero values are ignored
fn parse_concurrency_env(raw: Option<String>) -> Option<usize> {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
}

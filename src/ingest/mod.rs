// src/ingest/mod.rs
//! Batch driver: article list → text → engine → report rows.
//!
//! Articles are processed concurrently (bounded by a semaphore) and share one
//! `Arc<Lexicon>`. A failing article is logged, counted and skipped; it never
//! aborts the batch.

pub mod config;
pub mod extract;
pub mod providers;
pub mod types;

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use once_cell::sync::OnceCell;
use tokio::sync::Semaphore;
use tokio::task::{self, JoinSet};
use tracing::{info, warn};

use crate::engine::{AnalysisRecord, Engine};
use crate::ingest::types::{ArticleRef, ArticleSource};
use crate::lexicon::Lexicon;
use crate::tokenize::Tokenizer;

/// One-time metrics registration (so series show up in the exposition).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("articles_fetched_total", "Article pages fetched over HTTP.");
        describe_counter!(
            "articles_analyzed_total",
            "Articles that produced a full metrics record."
        );
        describe_counter!(
            "articles_failed_total",
            "Articles skipped, labelled by the failing stage."
        );
        describe_histogram!("article_fetch_ms", "HTTP fetch time in milliseconds.");
        describe_histogram!("analysis_ms", "Engine time per article in milliseconds.");
    });
}

#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Articles in flight at once (values below 1 are treated as 1).
    pub concurrency: usize,
    /// When set, each article's text is saved as `<dir>/<URL_ID>.txt`.
    pub articles_dir: Option<PathBuf>,
    pub tokenizer: Tokenizer,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            concurrency: 4,
            articles_dir: None,
            tokenizer: Tokenizer::default(),
        }
    }
}

/// Where an article failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    Write,
    Analyze,
    /// The article's task panicked or was cancelled.
    Task,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Fetch => "fetch",
            Stage::Write => "write",
            Stage::Analyze => "analyze",
            Stage::Task => "task",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub article: ArticleRef,
    pub record: AnalysisRecord,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleFailure {
    pub url_id: String,
    pub stage: Stage,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Successful rows in input order.
    pub rows: Vec<ReportRow>,
    pub failures: Vec<ArticleFailure>,
}

/// Process every article and collect report rows.
pub async fn run_batch(
    articles: &[ArticleRef],
    source: Arc<dyn ArticleSource>,
    lexicon: Arc<Lexicon>,
    opts: &BatchOptions,
) -> BatchOutcome {
    ensure_metrics_described();

    let sem = Arc::new(Semaphore::new(opts.concurrency.max(1)));
    let mut set = JoinSet::new();
    // task id -> (input position, URL_ID), so a panicked task is still attributed
    let mut owners: HashMap<task::Id, (usize, String)> = HashMap::with_capacity(articles.len());

    for (idx, article) in articles.iter().cloned().enumerate() {
        let sem = Arc::clone(&sem);
        let source = Arc::clone(&source);
        let lexicon = Arc::clone(&lexicon);
        let dir = opts.articles_dir.clone();
        let tokenizer = opts.tokenizer;
        let url_id = article.url_id.clone();

        let handle = set.spawn(async move {
            // the semaphore is never closed, so acquire only fails on shutdown
            let _permit = sem.acquire_owned().await.ok();
            let res = process_one(
                &article,
                source.as_ref(),
                &lexicon,
                dir.as_deref(),
                tokenizer,
            )
            .await;
            (idx, article, res)
        });
        owners.insert(handle.id(), (idx, url_id));
    }

    let mut done: Vec<(usize, ReportRow)> = Vec::with_capacity(articles.len());
    let mut failures = Vec::new();

    while let Some(joined) = set.join_next_with_id().await {
        match joined {
            Ok((_, (idx, article, Ok(record)))) => {
                counter!("articles_analyzed_total").increment(1);
                done.push((idx, ReportRow { article, record }));
            }
            Ok((_, (idx, article, Err((stage, e))))) => {
                failures.push((idx, failure(article.url_id, stage, format!("{e:#}"))));
            }
            Err(e) => match owners.remove(&e.id()) {
                Some((idx, url_id)) => {
                    failures.push((idx, failure(url_id, Stage::Task, e.to_string())));
                }
                None => warn!(target: "ingest", error = ?e, "unattributed article task failed"),
            },
        }
    }

    done.sort_by_key(|(idx, _)| *idx);
    failures.sort_by_key(|(idx, _)| *idx);

    BatchOutcome {
        rows: done.into_iter().map(|(_, row)| row).collect(),
        failures: failures.into_iter().map(|(_, f)| f).collect(),
    }
}

fn failure(url_id: String, stage: Stage, message: String) -> ArticleFailure {
    warn!(
        target: "ingest",
        url_id = %url_id,
        stage = stage.as_str(),
        error = %message,
        "error processing article"
    );
    counter!("articles_failed_total", "stage" => stage.as_str()).increment(1);
    ArticleFailure {
        url_id,
        stage,
        message,
    }
}

async fn process_one(
    article: &ArticleRef,
    source: &dyn ArticleSource,
    lexicon: &Lexicon,
    articles_dir: Option<&Path>,
    tokenizer: Tokenizer,
) -> std::result::Result<AnalysisRecord, (Stage, anyhow::Error)> {
    let text = source
        .article_text(article)
        .await
        .map_err(|e| (Stage::Fetch, e))?;

    if let Some(dir) = articles_dir {
        save_article_text(dir, &article.url_id, &text)
            .await
            .map_err(|e| (Stage::Write, e))?;
        info!(
            target: "ingest",
            url_id = %article.url_id,
            source = source.name(),
            "extracted and saved article"
        );
    }

    let t0 = std::time::Instant::now();
    let record = Engine::new(lexicon)
        .with_tokenizer(tokenizer)
        .analyze(&text)
        .map_err(|e| (Stage::Analyze, anyhow::Error::new(e)))?;
    histogram!("analysis_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);

    Ok(record)
}

/// Write `<dir>/<url_id>.txt`, creating `dir` if needed.
pub async fn save_article_text(dir: &Path, url_id: &str, text: &str) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(format!("{url_id}.txt"));
    tokio::fs::write(&path, text)
        .await
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

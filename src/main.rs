//! Article metrics batch entrypoint.
//! Loads the lexicon and article list, fetches and analyzes every article, and
//! writes the report.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use article_metrics::config::AppConfig;
use article_metrics::ingest::config::load_articles_from;
use article_metrics::ingest::providers::{DirArticleSource, HttpArticleSource};
use article_metrics::ingest::types::ArticleSource;
use article_metrics::ingest::{run_batch, BatchOptions};
use article_metrics::report::write_report;
use article_metrics::telemetry::{init_tracing, Metrics};
use article_metrics::Lexicon;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();

    let cfg = AppConfig::load_default()?;
    init_tracing(cfg.telemetry.log_format);

    let metrics = match &cfg.telemetry.metrics_path {
        Some(_) => Some(Metrics::init()?),
        None => None,
    };

    let lexicon = Lexicon::from_paths(&cfg.lexicon).context("loading lexicon")?;
    let articles = load_articles_from(&cfg.batch.input)?;
    info!(
        articles = articles.len(),
        input = %cfg.batch.input.display(),
        "article list loaded"
    );

    let source: Arc<dyn ArticleSource> = if cfg.batch.offline {
        Arc::new(DirArticleSource::new(cfg.batch.articles_dir.clone()))
    } else {
        Arc::new(
            HttpArticleSource::new()
                .with_user_agent(cfg.http.user_agent.clone())
                .with_timeout(cfg.http.timeout_secs)
                .with_min_words(cfg.batch.min_words),
        )
    };
    info!(source = source.name(), "article source ready");

    let opts = BatchOptions {
        concurrency: cfg.batch.concurrency,
        articles_dir: cfg.batch.save_dir(),
        tokenizer: cfg.tokenizer,
    };
    let outcome = run_batch(&articles, source, Arc::new(lexicon), &opts).await;

    for f in &outcome.failures {
        warn!(url_id = %f.url_id, stage = %f.stage, "skipped: {}", f.message);
    }

    write_report(&cfg.batch.output, &outcome.rows)?;
    info!(
        analyzed = outcome.rows.len(),
        failed = outcome.failures.len(),
        output = %cfg.batch.output.display(),
        "analysis complete"
    );

    if let (Some(m), Some(path)) = (&metrics, &cfg.telemetry.metrics_path) {
        m.write_snapshot(path)?;
    }

    Ok(())
}

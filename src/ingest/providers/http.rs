use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::{counter, histogram};
use reqwest::Client;
use std::time::Duration;

use crate::ingest::extract::{extract_article, DEFAULT_MIN_WORDS};
use crate::ingest::types::{ArticleRef, ArticleSource};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Fetches article pages over HTTP and extracts their prose.
#[derive(Clone)]
pub struct HttpArticleSource {
    client: Client,
    user_agent: String,
    timeout: Duration,
    min_words: usize,
}

impl HttpArticleSource {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            min_words: DEFAULT_MIN_WORDS,
        }
    }

    pub fn with_user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    pub fn with_min_words(mut self, min_words: usize) -> Self {
        self.min_words = min_words;
        self
    }

    async fn fetch_html(&self, url: &str) -> Result<String> {
        let resp = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .timeout(self.timeout)
            .send()
            .await
            .with_context(|| format!("GET {url}"))?;
        let resp = resp
            .error_for_status()
            .with_context(|| format!("GET {url} returned an error status"))?;
        resp.text().await.context("reading response body")
    }
}

impl Default for HttpArticleSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArticleSource for HttpArticleSource {
    async fn article_text(&self, article: &ArticleRef) -> Result<String> {
        let t0 = std::time::Instant::now();
        let html = self.fetch_html(&article.url).await?;
        histogram!("article_fetch_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
        counter!("articles_fetched_total").increment(1);

        extract_article(&html, self.min_words)
            .with_context(|| format!("extracting article {}", article.url_id))
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

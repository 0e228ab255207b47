// src/ingest/types.rs
use anyhow::Result;

/// One row of the input list. Neither field is seen by the engine.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct ArticleRef {
    #[serde(rename = "URL_ID", alias = "url_id")]
    pub url_id: String,
    #[serde(rename = "URL", alias = "url")]
    pub url: String,
}

impl ArticleRef {
    pub fn new(url_id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            url_id: url_id.into(),
            url: url.into(),
        }
    }
}

/// Produces the prose of an article. Fetching and extraction live behind this.
#[async_trait::async_trait]
pub trait ArticleSource: Send + Sync {
    async fn article_text(&self, article: &ArticleRef) -> Result<String>;
    fn name(&self) -> &'static str;
}

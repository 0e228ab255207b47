use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;

use crate::ingest::types::{ArticleRef, ArticleSource};

/// Reads previously saved article texts from `<dir>/<URL_ID>.txt`.
/// Lets a run be repeated offline against the files a fetch run wrote.
pub struct DirArticleSource {
    pub dir: PathBuf,
}

impl DirArticleSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, article: &ArticleRef) -> PathBuf {
        self.dir.join(format!("{}.txt", article.url_id))
    }
}

#[async_trait]
impl ArticleSource for DirArticleSource {
    async fn article_text(&self, article: &ArticleRef) -> Result<String> {
        let path = self.path_for(article);
        tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("reading article text from {}", path.display()))
    }

    fn name(&self) -> &'static str {
        "dir"
    }
}

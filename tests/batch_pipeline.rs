// tests/batch_pipeline.rs
use std::collections::HashMap;
use std::fs;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use article_metrics::ingest::config::load_articles_from;
use article_metrics::ingest::providers::DirArticleSource;
use article_metrics::ingest::types::{ArticleRef, ArticleSource};
use article_metrics::ingest::{run_batch, BatchOptions, Stage};
use article_metrics::report::{header, write_report};
use article_metrics::Lexicon;

struct MapSource(HashMap<String, String>);

#[async_trait]
impl ArticleSource for MapSource {
    async fn article_text(&self, article: &ArticleRef) -> Result<String> {
        self.0
            .get(&article.url)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("404 for {}", article.url))
    }
    fn name(&self) -> &'static str {
        "map"
    }
}

fn lexicon() -> Arc<Lexicon> {
    Arc::new(Lexicon::new(
        ["good", "gain"],
        ["loss", "weak"],
        ["the", "a", "of"],
    ))
}

fn pages() -> MapSource {
    let mut m = HashMap::new();
    m.insert(
        "https://example.test/one".to_string(),
        "A good gain for the team. We saw no loss.".to_string(),
    );
    m.insert(
        "https://example.test/two".to_string(),
        "Weak demand. The US market was weak.".to_string(),
    );
    MapSource(m)
}

#[tokio::test]
async fn fetch_save_report_then_rerun_offline() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("Input.csv");
    fs::write(
        &input,
        "URL_ID,URL\n\
         one,https://example.test/one\n\
         missing,https://example.test/missing\n\
         two,https://example.test/two\n\
         one,https://example.test/duplicate\n",
    )
    .unwrap();

    let articles = load_articles_from(&input).unwrap();
    assert_eq!(articles.len(), 3);

    let saved = tmp.path().join("articles");
    let opts = BatchOptions {
        concurrency: 3,
        articles_dir: Some(saved.clone()),
        ..BatchOptions::default()
    };
    let online = run_batch(&articles, Arc::new(pages()), lexicon(), &opts).await;

    assert_eq!(online.rows.len(), 2);
    assert_eq!(online.failures.len(), 1);
    assert_eq!(online.failures[0].url_id, "missing");
    assert_eq!(online.failures[0].stage, Stage::Fetch);
    assert!(online.failures[0].message.contains("404"));

    let one = &online.rows[0].record;
    assert_eq!((one.positive_score, one.negative_score), (2, 1));
    assert_eq!(one.personal_pronouns, 1);
    let two = &online.rows[1].record;
    assert_eq!((two.positive_score, two.negative_score), (0, 2));
    assert_eq!(two.personal_pronouns, 0);

    assert!(saved.join("one.txt").is_file());
    assert!(!saved.join("missing.txt").exists());

    // offline pass over the saved texts gives identical records
    let offline_opts = BatchOptions {
        concurrency: 1,
        ..BatchOptions::default()
    };
    let offline = run_batch(
        &articles,
        Arc::new(DirArticleSource::new(&saved)),
        lexicon(),
        &offline_opts,
    )
    .await;
    assert_eq!(offline.rows, online.rows);
    assert_eq!(offline.failures.len(), 1);

    let out = tmp.path().join("out").join("report.csv");
    write_report(&out, &online.rows).unwrap();

    let mut rdr = csv::Reader::from_path(&out).unwrap();
    let head: Vec<String> = rdr.headers().unwrap().iter().map(str::to_string).collect();
    assert_eq!(head, header());
    let recs: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(recs.len(), 2);
    assert_eq!(&recs[0][0], "one");
    assert_eq!(&recs[1][1], "https://example.test/two");
    assert_eq!(&recs[1][3], "2");
}

#[tokio::test]
async fn json_report_is_an_array_of_named_rows() {
    let tmp = tempfile::tempdir().unwrap();
    let articles = vec![ArticleRef::new("one", "https://example.test/one")];
    let out = run_batch(&articles, Arc::new(pages()), lexicon(), &BatchOptions::default()).await;

    let path = tmp.path().join("report.json");
    write_report(&path, &out.rows).unwrap();
    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let rows = v.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["URL_ID"], "one");
    assert_eq!(rows[0]["POSITIVE SCORE"], 2);
    assert_eq!(rows[0]["NEGATIVE SCORE"], 1);
}

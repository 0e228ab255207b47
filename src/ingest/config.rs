// src/ingest/config.rs
use anyhow::{anyhow, Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::ingest::types::ArticleRef;

/// Load the article list from an explicit path. Supports a spreadsheet
/// (`.xlsx`, `.xls`, `.ods`; first sheet, `URL_ID` and `URL` header cells),
/// CSV (`URL_ID,URL` header), a JSON array of objects, or TOML with
/// `[[articles]]` tables.
pub fn load_articles_from(path: &Path) -> Result<Vec<ArticleRef>> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    if matches!(ext.as_str(), "xlsx" | "xlsm" | "xls" | "ods") {
        return load_workbook(path)
            .with_context(|| format!("reading article workbook {}", path.display()));
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading article list from {}", path.display()))?;
    parse_articles(&content, ext.as_str())
        .with_context(|| format!("parsing article list {}", path.display()))
}

pub fn parse_articles(s: &str, hint_ext: &str) -> Result<Vec<ArticleRef>> {
    match hint_ext {
        "csv" => parse_csv(s),
        "json" => parse_json(s),
        "toml" => parse_toml(s),
        // No usable extension: try the structured formats, CSV last.
        _ => parse_json(s)
            .or_else(|_| parse_toml(s))
            .or_else(|_| parse_csv(s))
            .map_err(|_| anyhow!("unsupported article list format")),
    }
}

fn parse_csv(s: &str) -> Result<Vec<ArticleRef>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(s.as_bytes());
    let mut out = Vec::new();
    for row in rdr.deserialize::<ArticleRef>() {
        out.push(row?);
    }
    Ok(clean_list(out))
}

fn parse_json(s: &str) -> Result<Vec<ArticleRef>> {
    let v: Vec<ArticleRef> = serde_json::from_str(s)?;
    Ok(clean_list(v))
}

fn parse_toml(s: &str) -> Result<Vec<ArticleRef>> {
    #[derive(serde::Deserialize)]
    struct TomlList {
        articles: Vec<ArticleRef>,
    }
    let v: TomlList = toml::from_str(s)?;
    Ok(clean_list(v.articles))
}

fn load_workbook(path: &Path) -> Result<Vec<ArticleRef>> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow!("workbook has no sheets"))??;

    let mut rows = range.rows();
    let header: Vec<String> = rows
        .next()
        .ok_or_else(|| anyhow!("empty sheet"))?
        .iter()
        .map(cell_text)
        .collect();
    let column = |name: &str| {
        header
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow!("missing {name} column"))
    };
    let (id_col, url_col) = (column("URL_ID")?, column("URL")?);

    let items = rows
        .map(|row| {
            let get = |i: usize| row.get(i).map(cell_text).unwrap_or_default();
            ArticleRef::new(get(id_col), get(url_col))
        })
        .collect();
    Ok(clean_list(items))
}

// whole-number floats are ids typed as numbers, keep them integral
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}

/// Trim, drop rows with a blank id or url, keep the first row per id.
fn clean_list(items: Vec<ArticleRef>) -> Vec<ArticleRef> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::with_capacity(items.len());
    for it in items {
        let id = it.url_id.trim();
        let url = it.url.trim();
        if id.is_empty() || url.is_empty() {
            continue;
        }
        if !seen.insert(id.to_string()) {
            continue;
        }
        out.push(ArticleRef::new(id, url));
    }
    out
}

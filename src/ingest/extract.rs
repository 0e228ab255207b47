// src/ingest/extract.rs
//! Article extraction from blog-style HTML pages.
//!
//! Looks for the `<h1 class="entry-title">` headline and the
//! `<div class="td-post-content tagdiv-type">` body, then flattens paragraphs,
//! sub-headings and lists inside the body into plain prose. Every matching
//! element counts, nested ones included, so a paragraph inside a list item is
//! emitted with the item and again on its own. Tag matching is
//! regex + depth counting, which is enough for well-formed CMS output; it is not
//! a general HTML parser.

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;

pub const NO_TITLE: &str = "No title found";
pub const NO_CONTENT: &str = "No content found";

/// Pages with fewer words than this are treated as failed extractions.
pub const DEFAULT_MIN_WORDS: usize = 50;

static RE_TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<h1\b[^>]*\bclass\s*=\s*["'](?:[^"']*\s)?entry-title(?:\s[^"']*)?["'][^>]*>(.*?)</h1\s*>"#)
        .expect("title regex")
});
static RE_CONTENT_OPEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<div\b[^>]*\bclass\s*=\s*["']td-post-content tagdiv-type["'][^>]*>"#)
        .expect("content regex")
});
static RE_BLOCK_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<(p|h2|h3|h4|ul|ol)\b[^>]*>").expect("block regex"));
static RE_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]+>").expect("tag regex"));
static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("ws regex"));

/// Extract `"{title}\n\n{body}"` from a page. Fails when the result has fewer
/// than `min_words` whitespace-separated words.
pub fn extract_article(html: &str, min_words: usize) -> Result<String> {
    let title = RE_TITLE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| element_text(m.as_str()))
        .unwrap_or_else(|| NO_TITLE.to_string());

    let body = match content_block(html) {
        Some(inner) => collapse_whitespace(&flatten_blocks(inner)),
        None => NO_CONTENT.to_string(),
    };

    let full = format!("{title}\n\n{body}");
    let words = full.split_whitespace().count();
    if words < min_words {
        bail!("failed to extract meaningful content from the article ({words} words)");
    }
    Ok(full)
}

/// Visible text of an HTML fragment: tags removed, entities decoded, trimmed.
pub fn element_text(fragment: &str) -> String {
    let stripped = RE_TAGS.replace_all(fragment, "");
    html_escape::decode_html_entities(&stripped).trim().to_string()
}

/// Collapse every whitespace run to one space and trim.
pub fn collapse_whitespace(s: &str) -> String {
    RE_WS.replace_all(s, " ").trim().to_string()
}

fn content_block(html: &str) -> Option<&str> {
    let open = RE_CONTENT_OPEN.find(html)?;
    let lower = html.to_ascii_lowercase();
    let end = find_close(&lower, open.end(), "div")
        .map(|(at, _)| at)
        .unwrap_or(html.len());
    Some(&html[open.end()..end])
}

fn flatten_blocks(inner: &str) -> String {
    let lower = inner.to_ascii_lowercase();
    let mut parts: Vec<String> = Vec::new();
    let mut pos = 0;

    while let Some(caps) = RE_BLOCK_OPEN.captures_at(inner, pos) {
        let (Some(whole), Some(tag)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        let tag = tag.as_str().to_ascii_lowercase();
        let close_start = find_close(&lower, whole.end(), &tag)
            .map_or(inner.len(), |(at, _)| at);
        let content = &inner[whole.end()..close_start];

        match tag.as_str() {
            "h2" | "h3" | "h4" => parts.push(format!("\n\n{}\n", element_text(content))),
            "ul" | "ol" => {
                let items: Vec<String> = list_items(content)
                    .into_iter()
                    .map(|it| format!("• {it}"))
                    .collect();
                parts.push(format!("\n{}\n", items.join("\n")));
            }
            _ => parts.push(element_text(content)),
        }
        pos = whole.end();
    }

    parts.join("\n\n")
}

fn list_items(list_html: &str) -> Vec<String> {
    let lower = list_html.to_ascii_lowercase();
    let mut out = Vec::new();
    let mut pos = 0;
    while let Some(at) = find_tag(&lower, pos, "<li") {
        let Some(gt) = lower[at..].find('>') else {
            break;
        };
        let start = at + gt + 1;
        let close_start =
            find_close(&lower, start, "li").map_or(list_html.len(), |(end, _)| end);
        out.push(element_text(&list_html[start..close_start]));
        pos = start;
    }
    out
}

/// Locate the closing tag that balances an already opened `<tag>`.
/// `lower` must be the ASCII-lowercased document. Returns (start, end) byte
/// offsets of the closing tag.
fn find_close(lower: &str, from: usize, tag: &str) -> Option<(usize, usize)> {
    let open = format!("<{tag}");
    let close = format!("</{tag}");
    let mut depth = 1usize;
    let mut pos = from;
    loop {
        let next_close = find_tag(lower, pos, &close)?;
        match find_tag(lower, pos, &open) {
            Some(o) if o < next_close => {
                depth += 1;
                pos = o + open.len();
            }
            _ => {
                let end = lower[next_close..]
                    .find('>')
                    .map(|i| next_close + i + 1)
                    .unwrap_or(lower.len());
                depth -= 1;
                if depth == 0 {
                    return Some((next_close, end));
                }
                pos = end;
            }
        }
    }
}

/// Find `needle` (e.g. "<p") not followed by another name character, so `<p`
/// does not hit `<pre>`.
fn find_tag(lower: &str, from: usize, needle: &str) -> Option<usize> {
    let mut pos = from;
    while let Some(i) = lower.get(pos..)?.find(needle) {
        let at = pos + i;
        let after = lower[at + needle.len()..].chars().next();
        if after.map_or(true, |c| !c.is_ascii_alphanumeric()) {
            return Some(at);
        }
        pos = at + needle.len();
    }
    None
}

// src/tokenize.rs
//! Word and sentence segmentation plus the shared stop-word cleaning step.
//!
//! Segmentation starts from Unicode UAX #29 boundaries, so it is locale-agnostic
//! and deterministic. Two adjustments bring it in line with Treebank-style
//! English tokenization: sentence spans only end at terminal punctuation (line
//! and paragraph breaks are ordinary whitespace), and trailing clitics such as
//! `'s` and `n't` become tokens of their own.
//!
//! Tokens keep their original casing here; lower-casing happens in [`clean`],
//! which is the single cleaning pass every metric builds on.

use serde::Deserialize;
use unicode_segmentation::{USentenceBoundIndices, UWordBounds, UnicodeSegmentation};

use crate::lexicon::Lexicon;

/// Contraction and possessive endings split off a word, checked in order and
/// matched ASCII-case-insensitively. Both apostrophe forms are covered.
const CLITICS: [&str; 14] = [
    "n't", "n\u{2019}t", "'s", "\u{2019}s", "'re", "\u{2019}re", "'ll", "\u{2019}ll", "'m",
    "\u{2019}m", "'ve", "\u{2019}ve", "'d", "\u{2019}d",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Tokenizer {
    /// Standalone punctuation marks ("." "," "!") count as tokens.
    pub keep_punctuation: bool,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self {
            keep_punctuation: true,
        }
    }
}

impl Tokenizer {
    pub fn new(keep_punctuation: bool) -> Self {
        Self { keep_punctuation }
    }

    /// Sentence spans of `text`, trimmed. A span runs until `.`, `!` or `?`
    /// (optionally followed by closing quotes or brackets) or the end of text.
    pub fn sentences<'a>(&self, text: &'a str) -> Sentences<'a> {
        Sentences {
            text,
            inner: text.split_sentence_bound_indices(),
            start: None,
        }
    }

    pub fn sentence_count(&self, text: &str) -> usize {
        self.sentences(text).count()
    }

    /// Word tokens of `text` in original casing.
    pub fn words<'a>(&self, text: &'a str) -> Words<'a> {
        Words {
            inner: text.split_word_bounds(),
            keep_punctuation: self.keep_punctuation,
            pending: None,
        }
    }

    /// Tokenize and clean in one go.
    pub fn cleaned(&self, text: &str, lexicon: &Lexicon) -> Vec<String> {
        clean(self.words(text), lexicon)
    }
}

/// Lazy sentence iterator; call [`Tokenizer::sentences`] again to restart.
pub struct Sentences<'a> {
    text: &'a str,
    inner: USentenceBoundIndices<'a>,
    // byte offset where the sentence being assembled began
    start: Option<usize>,
}

impl<'a> Iterator for Sentences<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        for (idx, span) in self.inner.by_ref() {
            let start = *self.start.get_or_insert(idx);
            if ends_sentence(span) {
                self.start = None;
                let s = self.text[start..idx + span.len()].trim();
                if !s.is_empty() {
                    return Some(s);
                }
            }
        }
        let start = self.start.take()?;
        let s = self.text[start..].trim();
        (!s.is_empty()).then_some(s)
    }
}

fn ends_sentence(span: &str) -> bool {
    span.trim_end()
        .trim_end_matches(|c| matches!(c, '"' | '\'' | ')' | ']' | '\u{201D}' | '\u{2019}'))
        .ends_with(|c| matches!(c, '.' | '!' | '?'))
}

/// Lazy word iterator; call [`Tokenizer::words`] again to restart.
pub struct Words<'a> {
    inner: UWordBounds<'a>,
    keep_punctuation: bool,
    // clitic split off the previous segment, yielded next
    pending: Option<&'a str>,
}

impl<'a> Iterator for Words<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if let Some(clitic) = self.pending.take() {
            return Some(clitic);
        }
        for seg in self.inner.by_ref() {
            if seg.chars().all(char::is_whitespace) {
                continue;
            }
            if self.keep_punctuation || seg.chars().any(char::is_alphanumeric) {
                let (head, clitic) = split_clitic(seg);
                self.pending = clitic;
                return Some(head);
            }
        }
        None
    }
}

/// `"company's"` -> (`"company"`, `Some("'s")`), `"wasn't"` -> (`"was"`, `Some("n't")`).
fn split_clitic(seg: &str) -> (&str, Option<&str>) {
    for clitic in CLITICS {
        if seg.len() <= clitic.len() {
            continue;
        }
        let at = seg.len() - clitic.len();
        if seg.is_char_boundary(at) && seg[at..].eq_ignore_ascii_case(clitic) {
            return (&seg[..at], Some(&seg[at..]));
        }
    }
    (seg, None)
}

/// Lower-case every token and drop the ones found in the lexicon's stop words.
/// Order-preserving.
pub fn clean<'a, I>(tokens: I, lexicon: &Lexicon) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    tokens
        .into_iter()
        .map(str::to_lowercase)
        .filter(|t| !lexicon.is_stop_word(t))
        .collect()
}

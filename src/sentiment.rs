// src/sentiment.rs
//! Lexicon-based sentiment counts over the cleaned token stream.

use serde::Serialize;

use crate::lexicon::Lexicon;
use crate::tokenize::Tokenizer;

/// Added to the polarity and subjectivity denominators only.
pub const EPSILON: f64 = 0.000001;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentScore {
    pub positive: u64,
    /// Magnitude of the negative tally (never negative).
    pub negative: u64,
    pub polarity: f64,
    pub subjectivity: f64,
    /// Cleaned token count used as the subjectivity denominator.
    pub total_words: u64,
}

/// Tokenize, clean and score `text`.
pub fn score(text: &str, lexicon: &Lexicon, tokenizer: &Tokenizer) -> SentimentScore {
    let cleaned = tokenizer.cleaned(text, lexicon);
    score_tokens(&cleaned, lexicon)
}

/// Score an already cleaned (lower-cased, stop-word free) token sequence.
/// A token present in both lexicons counts on both sides.
pub fn score_tokens<S: AsRef<str>>(cleaned: &[S], lexicon: &Lexicon) -> SentimentScore {
    let mut positive: u64 = 0;
    let mut negative_tally: i64 = 0;

    for tok in cleaned {
        let w = tok.as_ref();
        if lexicon.is_positive(w) {
            positive += 1;
        }
        if lexicon.is_negative(w) {
            negative_tally -= 1;
        }
    }

    let negative = negative_tally.unsigned_abs();
    let total_words = cleaned.len() as u64;

    let (pos, neg) = (positive as f64, negative as f64);
    let polarity = (pos - neg) / ((pos + neg) + EPSILON);
    let subjectivity = (pos + neg) / (total_words as f64 + EPSILON);

    SentimentScore {
        positive,
        negative,
        polarity,
        subjectivity,
        total_words,
    }
}

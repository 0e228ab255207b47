//! # Analysis Engine
//! Pure, testable logic that maps raw article text → [`AnalysisRecord`].
//! No I/O, suitable for unit tests and parallel batch runs.
//!
//! Policy: tokens are cleaned once and that cleaned stream feeds sentiment,
//! readability, syllables and word length. Sentences and pronouns look at the
//! raw text. Only polarity and subjectivity are epsilon-protected; every other
//! ratio fails with `EmptyInput` on a zero denominator.

use serde::Serialize;
use tracing::debug;

use crate::error::EngineResult;
use crate::lexicon::Lexicon;
use crate::pronouns::count_personal_pronouns;
use crate::readability;
use crate::sentiment;
use crate::syllables::total_syllables;
use crate::tokenize::Tokenizer;

/// Column headers of [`AnalysisRecord`], in output order.
pub const RECORD_COLUMNS: [&str; 13] = [
    "POSITIVE SCORE",
    "NEGATIVE SCORE",
    "POLARITY SCORE",
    "SUBJECTIVITY SCORE",
    "AVG SENTENCE LENGTH",
    "PERCENTAGE OF COMPLEX WORDS",
    "FOG INDEX",
    "AVG NUMBER OF WORDS PER SENTENCE",
    "COMPLEX WORD COUNT",
    "WORD COUNT",
    "SYLLABLE PER WORD",
    "PERSONAL PRONOUNS",
    "AVG WORD LENGTH",
];

/// Metrics for one article. Field order is the report column order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnalysisRecord {
    #[serde(rename = "POSITIVE SCORE")]
    pub positive_score: u64,
    #[serde(rename = "NEGATIVE SCORE")]
    pub negative_score: u64,
    #[serde(rename = "POLARITY SCORE")]
    pub polarity_score: f64,
    #[serde(rename = "SUBJECTIVITY SCORE")]
    pub subjectivity_score: f64,
    #[serde(rename = "AVG SENTENCE LENGTH")]
    pub avg_sentence_length: f64,
    #[serde(rename = "PERCENTAGE OF COMPLEX WORDS")]
    pub percentage_complex_words: f64,
    #[serde(rename = "FOG INDEX")]
    pub fog_index: f64,
    /// Same value as `avg_sentence_length`; both columns are part of the report.
    #[serde(rename = "AVG NUMBER OF WORDS PER SENTENCE")]
    pub avg_words_per_sentence: f64,
    #[serde(rename = "COMPLEX WORD COUNT")]
    pub complex_word_count: u64,
    #[serde(rename = "WORD COUNT")]
    pub word_count: u64,
    #[serde(rename = "SYLLABLE PER WORD")]
    pub syllables_per_word: f64,
    #[serde(rename = "PERSONAL PRONOUNS")]
    pub personal_pronouns: u64,
    #[serde(rename = "AVG WORD LENGTH")]
    pub avg_word_length: f64,
}

impl AnalysisRecord {
    /// Values as strings, aligned with [`RECORD_COLUMNS`].
    pub fn to_fields(&self) -> [String; 13] {
        [
            self.positive_score.to_string(),
            self.negative_score.to_string(),
            self.polarity_score.to_string(),
            self.subjectivity_score.to_string(),
            self.avg_sentence_length.to_string(),
            self.percentage_complex_words.to_string(),
            self.fog_index.to_string(),
            self.avg_words_per_sentence.to_string(),
            self.complex_word_count.to_string(),
            self.word_count.to_string(),
            self.syllables_per_word.to_string(),
            self.personal_pronouns.to_string(),
            self.avg_word_length.to_string(),
        ]
    }

    /// Values as numbers, aligned with [`RECORD_COLUMNS`].
    pub fn to_numbers(&self) -> [f64; 13] {
        [
            self.positive_score as f64,
            self.negative_score as f64,
            self.polarity_score,
            self.subjectivity_score,
            self.avg_sentence_length,
            self.percentage_complex_words,
            self.fog_index,
            self.avg_words_per_sentence,
            self.complex_word_count as f64,
            self.word_count as f64,
            self.syllables_per_word,
            self.personal_pronouns as f64,
            self.avg_word_length,
        ]
    }
}

/// Analyzer bound to a lexicon. Cheap to construct; holds no per-call state.
#[derive(Debug, Clone, Copy)]
pub struct Engine<'l> {
    lexicon: &'l Lexicon,
    tokenizer: Tokenizer,
}

impl<'l> Engine<'l> {
    pub fn new(lexicon: &'l Lexicon) -> Self {
        Self {
            lexicon,
            tokenizer: Tokenizer::default(),
        }
    }

    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn analyze(&self, text: &str) -> EngineResult<AnalysisRecord> {
        let cleaned = self.tokenizer.cleaned(text, self.lexicon);
        let sentences = self.tokenizer.sentence_count(text);

        let senti = sentiment::score_tokens(&cleaned, self.lexicon);
        let read = readability::score_parts(&cleaned, sentences)?;
        let pronouns = count_personal_pronouns(text);

        // non-empty from here on, score_parts rejects an empty stream
        let word_count = cleaned.len() as f64;
        let syllables = total_syllables(&cleaned)?;
        let chars: usize = cleaned.iter().map(|w| w.chars().count()).sum();

        debug!(
            target: "engine",
            words = cleaned.len(),
            sentences,
            complex = read.complex_word_count,
            pronouns,
            "article analyzed"
        );

        Ok(AnalysisRecord {
            positive_score: senti.positive,
            negative_score: senti.negative,
            polarity_score: senti.polarity,
            subjectivity_score: senti.subjectivity,
            avg_sentence_length: read.avg_sentence_length,
            percentage_complex_words: read.percent_complex,
            fog_index: read.fog_index,
            avg_words_per_sentence: read.avg_sentence_length,
            complex_word_count: read.complex_word_count,
            word_count: senti.total_words,
            syllables_per_word: syllables as f64 / word_count,
            personal_pronouns: pronouns,
            avg_word_length: chars as f64 / word_count,
        })
    }
}

/// Analyze `text` with the default tokenizer.
pub fn analyze(text: &str, lexicon: &Lexicon) -> EngineResult<AnalysisRecord> {
    Engine::new(lexicon).analyze(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EmptyBasis, EngineError};

    fn lx() -> Lexicon {
        Lexicon::new(
            ["love", "amazing", "great"],
            Vec::<&str>::new(),
            ["this", "it", "is"],
        )
    }

    const TEXT: &str = "I love this amazing product. We think it is great.";

    #[test]
    fn reference_article() {
        let r = analyze(TEXT, &lx()).unwrap();
        // i love amazing product . we think great .
        assert_eq!(r.positive_score, 3);
        assert_eq!(r.negative_score, 0);
        assert_eq!(r.word_count, 9);
        assert_eq!(r.personal_pronouns, 2);
        assert_eq!(r.avg_sentence_length, 4.5);
        assert_eq!(r.complex_word_count, 1);
        assert_eq!(r.syllables_per_word, 12.0 / 9.0);
        assert_eq!(r.avg_word_length, 33.0 / 9.0);
        assert!((r.polarity_score - 3.0 / (3.0 + 1e-6)).abs() < 1e-12);
        assert!((r.subjectivity_score - 3.0 / (9.0 + 1e-6)).abs() < 1e-12);
    }

    #[test]
    fn duplicate_column_matches() {
        let r = analyze(TEXT, &lx()).unwrap();
        assert_eq!(r.avg_words_per_sentence, r.avg_sentence_length);
        assert_eq!(
            r.fog_index,
            0.4 * (r.avg_sentence_length + r.percentage_complex_words)
        );
    }

    #[test]
    fn punctuation_free_tokenizer_changes_the_basis() {
        let lexicon = lx();
        let r = Engine::new(&lexicon)
            .with_tokenizer(Tokenizer::new(false))
            .analyze(TEXT)
            .unwrap();
        assert_eq!(r.word_count, 7);
        assert_eq!(r.avg_sentence_length, 3.5);
    }

    #[test]
    fn all_stop_words_is_empty_input() {
        let err = analyze("This it is", &lx()).unwrap_err();
        assert!(matches!(
            err,
            EngineError::EmptyInput(EmptyBasis::CleanedTokens)
        ));
    }

    #[test]
    fn empty_text_is_empty_input() {
        let err = analyze("", &lx()).unwrap_err();
        assert!(matches!(err, EngineError::EmptyInput(EmptyBasis::Sentences)));
    }

    #[test]
    fn to_fields_follows_column_order() {
        let r = analyze(TEXT, &lx()).unwrap();
        let f = r.to_fields();
        assert_eq!(f.len(), RECORD_COLUMNS.len());
        assert_eq!(f[0], "3");
        assert_eq!(f[9], "9");
        assert_eq!(f[4], f[7]);
    }
}

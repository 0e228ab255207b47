// src/readability.rs
//! Gunning-Fog style readability over the cleaned token stream.
//!
//! Sentences are counted on the raw text while word counts come from the
//! stop-word filtered tokens, so `avg_sentence_length` mixes both bases.
//! `percent_complex` is a fraction in [0, 1], not a percentage.

use serde::Serialize;

use crate::error::{EmptyBasis, EngineError, EngineResult};
use crate::lexicon::Lexicon;
use crate::syllables::count_syllables;
use crate::tokenize::Tokenizer;

/// Words with more syllables than this are complex.
pub const COMPLEX_SYLLABLE_THRESHOLD: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReadabilityScore {
    pub avg_sentence_length: f64,
    pub percent_complex: f64,
    pub fog_index: f64,
    pub complex_word_count: u64,
    pub total_words: u64,
    pub total_sentences: u64,
}

pub fn score(text: &str, lexicon: &Lexicon, tokenizer: &Tokenizer) -> EngineResult<ReadabilityScore> {
    let sentences = tokenizer.sentence_count(text);
    let cleaned = tokenizer.cleaned(text, lexicon);
    score_parts(&cleaned, sentences)
}

/// Score from cleaned tokens and the sentence count of the raw text.
/// Neither denominator is epsilon-protected.
pub fn score_parts<S: AsRef<str>>(cleaned: &[S], sentence_count: usize) -> EngineResult<ReadabilityScore> {
    if sentence_count == 0 {
        return Err(EngineError::EmptyInput(EmptyBasis::Sentences));
    }
    if cleaned.is_empty() {
        return Err(EngineError::EmptyInput(EmptyBasis::CleanedTokens));
    }

    let mut complex_word_count: u64 = 0;
    for w in cleaned {
        if count_syllables(w.as_ref())? > COMPLEX_SYLLABLE_THRESHOLD {
            complex_word_count += 1;
        }
    }

    let total_words = cleaned.len() as u64;
    let avg_sentence_length = total_words as f64 / sentence_count as f64;
    let percent_complex = complex_word_count as f64 / total_words as f64;
    let fog_index = 0.4 * (avg_sentence_length + percent_complex);

    Ok(ReadabilityScore {
        avg_sentence_length,
        percent_complex,
        fog_index,
        complex_word_count,
        total_words,
        total_sentences: sentence_count as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lx() -> Lexicon {
        Lexicon::new(Vec::<&str>::new(), Vec::<&str>::new(), ["the", "a", "is"])
    }

    #[test]
    fn fog_identity_holds() {
        let r = score(
            "The committee is considering an extraordinary proposal. A decision follows tomorrow.",
            &lx(),
            &Tokenizer::default(),
        )
        .unwrap();
        assert_eq!(r.total_sentences, 2);
        assert!(r.complex_word_count > 0);
        let expected = 0.4 * (r.avg_sentence_length + r.percent_complex);
        assert!((r.fog_index - expected).abs() < 1e-12);
    }

    #[test]
    fn word_basis_is_cleaned_tokens() {
        // "the" and "is" are removed, "." stays as a token
        let r = score("The sky is blue.", &lx(), &Tokenizer::default()).unwrap();
        assert_eq!(r.total_words, 3);
        assert_eq!(r.total_sentences, 1);
        assert_eq!(r.avg_sentence_length, 3.0);
    }

    #[test]
    fn complex_means_more_than_two_syllables() {
        let r = score_parts(&["tumble", "amazing", "banana", "cat"], 1).unwrap();
        // tumble=2, amazing=3, banana=3, cat=1
        assert_eq!(r.complex_word_count, 2);
        assert_eq!(r.percent_complex, 0.5);
    }

    #[test]
    fn zero_sentences_is_empty_input() {
        let err = score_parts(&["word"], 0).unwrap_err();
        assert!(matches!(err, EngineError::EmptyInput(EmptyBasis::Sentences)));
    }

    #[test]
    fn zero_cleaned_words_is_empty_input() {
        let err = score("The the is a", &lx(), &Tokenizer::default()).unwrap_err();
        assert!(matches!(
            err,
            EngineError::EmptyInput(EmptyBasis::CleanedTokens)
        ));
    }
}

// src/syllables.rs
//! Heuristic syllable estimate used for complex-word detection and the
//! syllables-per-word metric.
//!
//! Counts vowel-group onsets, then corrects for a silent trailing `e` and the
//! syllabic `-le` ending. It is a fixed approximation, not a dictionary lookup:
//! "queue" or "recipe" come out wrong and must stay that way so reports remain
//! comparable across runs.

use crate::error::{EngineError, EngineResult};

#[inline]
fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

/// Estimated syllables in `word` (always >= 1). Empty words are rejected.
pub fn count_syllables(word: &str) -> EngineResult<usize> {
    if word.is_empty() {
        return Err(EngineError::InvalidToken);
    }
    let word = word.to_lowercase();
    let chars: Vec<char> = word.chars().collect();

    let mut count: i64 = 0;
    if is_vowel(chars[0]) {
        count += 1;
    }
    for pair in chars.windows(2) {
        if is_vowel(pair[1]) && !is_vowel(pair[0]) {
            count += 1;
        }
    }
    if word.ends_with('e') {
        count -= 1;
    }
    // applied after the trailing-e correction
    if word.ends_with("le") {
        count += 1;
    }

    Ok(count.max(1) as usize)
}

/// Sum of [`count_syllables`] over `words`.
pub fn total_syllables<S: AsRef<str>>(words: &[S]) -> EngineResult<usize> {
    words.iter().try_fold(0usize, |acc, w| {
        Ok(acc + count_syllables(w.as_ref())?)
    })
}

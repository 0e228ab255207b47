// src/pronouns.rs
//! First-person pronoun counting over the raw (uncleaned) text.

use once_cell::sync::Lazy;
use regex::Regex;

static PRONOUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:I|we|my|ours|us)\b").expect("pronoun regex"));

static WS_THEN_LOWER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s+[a-z]").expect("follow-up regex"));

/// Count `I`, `we`, `my`, `ours`, `us` (any casing) as whole words.
/// Matches that look like the country abbreviation are skipped, see
/// [`is_country_abbreviation`].
pub fn count_personal_pronouns(text: &str) -> u64 {
    PRONOUNS
        .find_iter(text)
        .filter(|m| !is_country_abbreviation(m.as_str(), &text[m.end()..]))
        .count() as u64
}

/// Best-effort guess that a matched "us" is the country, not the pronoun.
///
/// True only when the match is exactly uppercase `US` and `rest` (the text right
/// after it) starts with whitespace followed by a lowercase ASCII letter, as in
/// "US government". "US Army", "US." or "Us" are still counted as pronouns.
/// This is a casing heuristic, not entity recognition.
pub fn is_country_abbreviation(matched: &str, rest: &str) -> bool {
    matched == "US" && WS_THEN_LOWER.is_match(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_each_pronoun_case_insensitively() {
        assert_eq!(count_personal_pronouns("I and we, My ours US."), 5);
        assert_eq!(count_personal_pronouns("i WE mY OURS us"), 5);
    }

    #[test]
    fn whole_words_only() {
        assert_eq!(count_personal_pronouns("mystery west iris usual ourselves"), 0);
    }

    #[test]
    fn country_before_common_noun_is_excluded() {
        assert_eq!(count_personal_pronouns("The US government spoke."), 0);
        assert_eq!(count_personal_pronouns("US\ttroops left"), 0);
    }

    #[test]
    fn other_us_forms_are_counted() {
        assert_eq!(count_personal_pronouns("Join us today."), 1);
        assert_eq!(count_personal_pronouns("Us three went."), 1);
        assert_eq!(count_personal_pronouns("The US Army"), 1);
        assert_eq!(count_personal_pronouns("Made in the US."), 1);
        assert_eq!(count_personal_pronouns("us government"), 1);
    }

    #[test]
    fn each_match_is_judged_at_its_own_position() {
        // first "US" is the pronoun, second is the country
        let text = "They told US. The US economy grew.";
        assert_eq!(count_personal_pronouns(text), 1);
    }

    #[test]
    fn heuristic_truth_table() {
        assert!(is_country_abbreviation("US", " policy"));
        assert!(!is_country_abbreviation("US", "policy"));
        assert!(!is_country_abbreviation("US", " Policy"));
        assert!(!is_country_abbreviation("us", " policy"));
        assert!(!is_country_abbreviation("Us", " policy"));
        assert!(!is_country_abbreviation("US", ""));
    }

    #[test]
    fn reference_sentence() {
        let text = "I love this amazing product. We think it is great.";
        assert_eq!(count_personal_pronouns(text), 2);
    }
}

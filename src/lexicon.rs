// src/lexicon.rs
//! Positive / negative / stop-word sets shared read-only by every analysis.
//!
//! Word files are plain text, one entry per line. Entries are trimmed and
//! lower-cased at load time; invalid UTF-8 bytes are dropped rather than
//! failing the whole file (dictionary dumps are often Latin-1 polluted).

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{EngineError, EngineResult};

/// Where the three word sets live on disk.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct LexiconPaths {
    pub positive: PathBuf,
    pub negative: PathBuf,
    /// Every regular file in this directory contributes stop words.
    pub stop_words_dir: PathBuf,
}

impl Default for LexiconPaths {
    fn default() -> Self {
        Self {
            positive: PathBuf::from("MasterDictionary/positive-words.txt"),
            negative: PathBuf::from("MasterDictionary/negative-words.txt"),
            stop_words_dir: PathBuf::from("StopWords"),
        }
    }
}

/// Source of word sets. The engine never reads files itself.
pub trait WordSetLoader {
    fn load_word_set(&self, source: &Path) -> EngineResult<HashSet<String>>;
}

/// Reads word sets from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileWordSets;

impl WordSetLoader for FileWordSets {
    fn load_word_set(&self, source: &Path) -> EngineResult<HashSet<String>> {
        let bytes = fs::read(source).map_err(|e| EngineError::lexicon_load(source, e))?;
        Ok(parse_word_set(&String::from_utf8_lossy(&bytes)))
    }
}

/// One word per line; blank lines and decoding leftovers are skipped.
pub fn parse_word_set(content: &str) -> HashSet<String> {
    content
        .lines()
        .map(|l| l.replace('\u{FFFD}', ""))
        .map(|l| l.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Immutable classification sets. Build once, share by reference (or `Arc`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    positive_words: HashSet<String>,
    negative_words: HashSet<String>,
    stop_words: HashSet<String>,
}

impl Lexicon {
    /// Build from in-memory word lists. Entries are lower-cased.
    pub fn new<P, N, S>(positive: P, negative: N, stop: S) -> Self
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        N: IntoIterator,
        N::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        fn lower<I>(it: I) -> HashSet<String>
        where
            I: IntoIterator,
            I::Item: AsRef<str>,
        {
            it.into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect()
        }

        Self {
            positive_words: lower(positive),
            negative_words: lower(negative),
            stop_words: lower(stop),
        }
    }

    /// Load the three sets through `loader`. Stop words are the union of every
    /// regular file in `paths.stop_words_dir`, visited in sorted path order.
    pub fn load<L: WordSetLoader>(loader: &L, paths: &LexiconPaths) -> EngineResult<Self> {
        let positive_words = loader.load_word_set(&paths.positive)?;
        let negative_words = loader.load_word_set(&paths.negative)?;

        let mut stop_words = HashSet::new();
        let files = stop_word_files(&paths.stop_words_dir)?;
        for file in &files {
            stop_words.extend(loader.load_word_set(file)?);
        }

        info!(
            target: "lexicon",
            positive = positive_words.len(),
            negative = negative_words.len(),
            stop = stop_words.len(),
            stop_files = files.len(),
            "lexicon loaded"
        );

        Ok(Self {
            positive_words,
            negative_words,
            stop_words,
        })
    }

    /// Convenience for the common on-disk layout.
    pub fn from_paths(paths: &LexiconPaths) -> EngineResult<Self> {
        Self::load(&FileWordSets, paths)
    }

    pub fn is_positive(&self, word: &str) -> bool {
        self.positive_words.contains(word)
    }

    pub fn is_negative(&self, word: &str) -> bool {
        self.negative_words.contains(word)
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn positive_words(&self) -> &HashSet<String> {
        &self.positive_words
    }

    pub fn negative_words(&self) -> &HashSet<String> {
        &self.negative_words
    }

    pub fn stop_words(&self) -> &HashSet<String> {
        &self.stop_words
    }
}

fn stop_word_files(dir: &Path) -> EngineResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| EngineError::lexicon_load(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| EngineError::lexicon_load(dir, e))?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

// src/error.rs
//! Typed errors raised by the analysis engine.
//!
//! Adapters and the batch driver work with `anyhow::Result`; the engine keeps a
//! closed error set so callers can tell "nothing to measure" apart from a broken
//! lexicon.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Which unprotected denominator turned out to be zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyBasis {
    /// The raw text contains no sentence.
    Sentences,
    /// Nothing is left after stop-word removal.
    CleanedTokens,
}

impl fmt::Display for EmptyBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyBasis::Sentences => f.write_str("no sentences"),
            EmptyBasis::CleanedTokens => f.write_str("no words left after stop-word removal"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("empty input: {0}")]
    EmptyInput(EmptyBasis),

    #[error("invalid token: syllables requested for an empty word")]
    InvalidToken,

    #[error("failed to load word set from {}", path.display())]
    LexiconLoad {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl EngineError {
    pub(crate) fn lexicon_load(path: impl Into<PathBuf>, source: io::Error) -> Self {
        EngineError::LexiconLoad {
            path: path.into(),
            source,
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;

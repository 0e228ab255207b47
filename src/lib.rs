// src/lib.rs
// Public library surface for the binary and integration tests.

// Text analysis engine
pub mod engine;
pub mod error;
pub mod lexicon;
pub mod pronouns;
pub mod readability;
pub mod sentiment;
pub mod syllables;
pub mod tokenize;

// I/O around the engine: article list, fetching, batch driver, report
pub mod config;
pub mod ingest;
pub mod report;
pub mod telemetry;

// ---- Re-exports for stable public API ----
pub use crate::engine::{analyze, AnalysisRecord, Engine, RECORD_COLUMNS};
pub use crate::error::{EmptyBasis, EngineError, EngineResult};
pub use crate::lexicon::{FileWordSets, Lexicon, LexiconPaths, WordSetLoader};
pub use crate::tokenize::Tokenizer;

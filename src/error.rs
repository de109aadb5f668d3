//! Error types.
//!
//! The chunkers and the metadata extractor are total and never surface these
//! to their callers; they appear at configuration load, inside extractors
//! (where they degrade to empty metadata) and in batch ingestion.

use thiserror::Error;

/// Invalid chunking configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be greater than zero")]
    ZeroSize(&'static str),

    #[error("overlap ({overlap}) must be smaller than chunk_size ({chunk_size})")]
    OverlapTooLarge { overlap: usize, chunk_size: usize },
}

/// Failure inside a metadata extractor.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("failed to compile {language} pattern: {source}")]
    Pattern {
        language: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("{language} extractor panicked")]
    Panicked { language: &'static str },
}

/// Failure while preparing a document for indexing.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("document {path} is {size} bytes, above the {limit} byte limit")]
    ContentTooLarge {
        path: String,
        size: usize,
        limit: usize,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("worker for {path} failed: {message}")]
    Worker { path: String, message: String },
}

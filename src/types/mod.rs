//! Core types for the ingestion core.

mod chunk;
mod config;
mod document;
mod metadata;

pub use chunk::{finalize_totals, Chunk};
pub use config::{ChunkingConfig, CodeChunkOptions, TextChunkOptions};
pub use document::{Document, SourceType};
pub use metadata::CodeMetadata;

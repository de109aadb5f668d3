//! Ingest Chunker Library
//!
//! Splits documents into bounded-size chunks for embedding and extracts
//! lightweight structural metadata from source files. Source code is cut
//! only at balanced-brace and preprocessor-region boundaries, never inside
//! a block, string or comment.

pub mod batch;
pub mod chunkers;
pub mod enrichment;
pub mod error;
pub mod ingest;
pub mod processing;
pub mod router;
pub mod types;

pub use batch::{BatchConfig, BatchProcessor, BatchResult};
pub use chunkers::{chunk_code, chunk_text, find_safe_split_positions, Chunker};
pub use enrichment::{extract_code_metadata, is_code_file_for_metadata};
pub use error::{ConfigError, IngestError, MetadataError};
pub use ingest::{plan_reindex, prepare_document, prepare_document_with, IndexedChunk, PreparedDocument, ReindexPlan};
pub use processing::is_code_file_for_chunking;
pub use router::{ChunkStrategy, DocumentRouter};
pub use types::{Chunk, ChunkingConfig, CodeChunkOptions, CodeMetadata, Document, TextChunkOptions};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::batch::*;
    pub use crate::chunkers::{chunk_code, chunk_text, Chunker, CodeChunker, TextChunker};
    pub use crate::enrichment::{extract_code_metadata, MetadataExtractor};
    pub use crate::ingest::*;
    pub use crate::router::{ChunkStrategy, DocumentRouter};
    pub use crate::types::*;
}

/// Default plain chunk size in characters
pub const DEFAULT_CHUNK_SIZE: usize = 2400;

/// Default plain chunk overlap in characters
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// Content at or below this many characters is never split
pub const DEFAULT_CHUNK_THRESHOLD: usize = 500;

/// Default preferred code chunk length in characters
pub const DEFAULT_CODE_TARGET_SIZE: usize = 2400;

/// Default distance a code split may move from the target
pub const DEFAULT_CODE_MARGIN: usize = 600;

/// Default smallest code chunk in characters
pub const DEFAULT_CODE_MIN_CHUNK_SIZE: usize = 800;

/// Documents prepared concurrently by the batch processor
pub const DEFAULT_BATCH_CONCURRENCY: usize = 4;

/// Maximum content size for single-pass processing (10MB)
pub const DEFAULT_MAX_CONTENT_SIZE: usize = 10 * 1024 * 1024;

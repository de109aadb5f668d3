//! Chunking strategies for documents and source code.

mod base;
pub mod boundary;
mod code_chunker;
mod text_chunker;

pub use base::Chunker;
pub use boundary::find_safe_split_positions;
pub use code_chunker::{chunk_code, select_split, CodeChunker};
pub use text_chunker::{chunk_text, TextChunker};

//! Plain sliding-window chunker.

use super::base::{char_boundaries, Chunker};
use crate::types::{finalize_totals, Chunk, TextChunkOptions};

/// Split `content` into fixed-size windows that overlap by `overlap` characters.
///
/// Content at or below the threshold (including the empty string) is
/// returned whole. Otherwise each window is at most `chunk_size` characters
/// and starts `overlap` characters before the previous window's end; the
/// overlap is clamped to `chunk_size - 1` so every window moves forward.
pub fn chunk_text(content: &str, options: &TextChunkOptions) -> Vec<Chunk> {
    let offsets = char_boundaries(content);
    let len = offsets.len() - 1;

    if len <= options.threshold {
        return Chunk::single(content);
    }

    let (chunk_size, overlap) = options.effective();
    let mut chunks = Vec::with_capacity(len / (chunk_size - overlap) + 1);
    let mut start = 0;

    loop {
        let end = (start + chunk_size).min(len);
        chunks.push(Chunk::new(&content[offsets[start]..offsets[end]], chunks.len()));

        if end >= len {
            break;
        }
        start = end - overlap;
    }

    finalize_totals(&mut chunks);
    chunks
}

/// Simple length-based chunker that ignores the structure of the content.
///
/// This is the most basic chunker. It's fast and predictable, useful for
/// prose and as the fallback of the code chunker.
pub struct TextChunker {
    options: TextChunkOptions,
}

impl TextChunker {
    /// Create a new text chunker.
    pub fn new(options: TextChunkOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TextChunkOptions {
        &self.options
    }
}

impl Default for TextChunker {
    fn default() -> Self {
        Self::new(TextChunkOptions::default())
    }
}

impl Chunker for TextChunker {
    fn name(&self) -> &'static str {
        "text"
    }

    fn description(&self) -> &'static str {
        "Splits text into fixed-size character windows with overlap"
    }

    fn chunk(&self, content: &str, _file_name: &str) -> Vec<Chunk> {
        chunk_text(content, &self.options)
    }
}

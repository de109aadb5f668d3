//! Boundary-aware code chunker.
//!
//! Splits brace-structured source at the safe split points found by the
//! boundary scanner, aiming for chunks of roughly `target_size` characters.
//! The chunk sequence is lossless: concatenating the chunks in order gives
//! back the input exactly.

use tracing::debug;

use super::base::{char_boundaries, Chunker};
use super::boundary;
use super::text_chunker::chunk_text;
use crate::processing::is_code_file_for_chunking;
use crate::types::{finalize_totals, Chunk, CodeChunkOptions};

/// Chunk source code at block and directive boundaries.
///
/// Files whose extension is not brace-structured go through the plain
/// chunker with `chunk_size = target_size`. Content without interior
/// boundaries comes back as a single chunk.
pub fn chunk_code(content: &str, file_name: &str, options: &CodeChunkOptions) -> Vec<Chunk> {
    if !is_code_file_for_chunking(file_name) {
        debug!(file_name, "Not a brace-structured file, using plain chunking");
        return chunk_text(content, &options.as_text_options());
    }

    let chars: Vec<char> = content.chars().collect();
    let len = chars.len();

    if len <= options.threshold {
        return Chunk::single(content);
    }

    let positions = boundary::scan(&chars);
    if positions.len() < 2 {
        debug!(file_name, "No safe split points, using plain chunking");
        return chunk_text(content, &options.as_text_options());
    }

    let offsets = char_boundaries(content);
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < len {
        let end = select_split(&positions, start, len, options);
        if end > start {
            chunks.push(Chunk::new(&content[offsets[start]..offsets[end]], chunks.len()));
        }
        start = end;
    }

    debug!(
        file_name,
        candidates = positions.len(),
        chunks = chunks.len(),
        "Chunked code at safe boundaries"
    );

    finalize_totals(&mut chunks);
    chunks
}

/// Pick the end of the chunk starting at `start`.
///
/// The acceptable window is
/// `[start + max(min_chunk_size, target_size - margin), start + target_size + margin]`.
/// The candidate inside the window closest to `start + target_size` wins,
/// the lowest offset on a tie. Without one, the first candidate at or past
/// the window's lower bound is used, and failing that the end of content.
/// The result is always greater than `start`.
pub fn select_split(
    positions: &[usize],
    start: usize,
    len: usize,
    options: &CodeChunkOptions,
) -> usize {
    let target = options.target_size.max(1);
    let min_chunk = options.min_chunk_size.max(1);

    let ideal = start.saturating_add(target);
    let low = start.saturating_add(min_chunk.max(target.saturating_sub(options.margin)));
    let high = ideal.saturating_add(options.margin);

    let mut best: Option<(usize, usize)> = None;
    let mut fallback = None;

    let first = positions.partition_point(|&p| p <= start);
    for &p in positions[first..].iter().filter(|&&p| p >= low) {
        if fallback.is_none() {
            fallback = Some(p);
        }
        if p > high {
            break;
        }
        let distance = p.abs_diff(ideal);
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((p, distance));
        }
    }

    best.map(|(p, _)| p).or(fallback).unwrap_or(len)
}

/// Code chunker that splits at brace-depth and directive boundaries.
pub struct CodeChunker {
    options: CodeChunkOptions,
}

impl CodeChunker {
    /// Create a new code chunker.
    pub fn new(options: CodeChunkOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CodeChunkOptions {
        &self.options
    }
}

impl Default for CodeChunker {
    fn default() -> Self {
        Self::new(CodeChunkOptions::default())
    }
}

impl Chunker for CodeChunker {
    fn name(&self) -> &'static str {
        "code"
    }

    fn description(&self) -> &'static str {
        "Splits source code at balanced-brace and #endif/#endregion boundaries"
    }

    fn supports_file(&self, file_name: &str) -> bool {
        is_code_file_for_chunking(file_name)
    }

    fn chunk(&self, content: &str, file_name: &str) -> Vec<Chunk> {
        chunk_code(content, file_name, &self.options)
    }
}

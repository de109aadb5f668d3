//! Chunk type definitions.

use serde::{Deserialize, Serialize};

/// A contiguous span of a document's text plus its position within the split.
///
/// Chunks are the fundamental unit of content that gets embedded and indexed.
/// Within one result sequence `chunk_index` is the emission position and
/// `total_chunks` is the length of the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// The actual text content of the chunk
    pub text: String,

    /// Order of this chunk within its document (0-indexed)
    pub chunk_index: usize,

    /// Number of chunks produced for the document
    pub total_chunks: usize,
}

impl Chunk {
    /// Create a chunk whose total is not known yet.
    ///
    /// Call [`finalize_totals`] once the whole sequence has been emitted.
    pub fn new(text: impl Into<String>, chunk_index: usize) -> Self {
        Self {
            text: text.into(),
            chunk_index,
            total_chunks: 0,
        }
    }

    /// A sequence consisting of the whole content as one chunk.
    pub fn single(content: &str) -> Vec<Self> {
        vec![Self {
            text: content.to_string(),
            chunk_index: 0,
            total_chunks: 1,
        }]
    }

    /// Length of the chunk text in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if the chunk is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Stamp every chunk with the final sequence length.
pub fn finalize_totals(chunks: &mut [Chunk]) {
    let total = chunks.len();
    for chunk in chunks.iter_mut() {
        chunk.total_chunks = total;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_chunk() {
        let chunks = Chunk::single("hello");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].chunk_index, 0);
        assert_eq!(chunks[0].total_chunks, 1);
        assert_eq!(chunks[0].text, "hello");
    }

    #[test]
    fn test_finalize_totals() {
        let mut chunks = vec![Chunk::new("a", 0), Chunk::new("b", 1), Chunk::new("c", 2)];
        finalize_totals(&mut chunks);
        assert!(chunks.iter().all(|c| c.total_chunks == 3));
    }

    #[test]
    fn test_len_counts_chars() {
        let chunk = Chunk::new("héllo", 0);
        assert_eq!(chunk.len(), 5);
        assert!(!chunk.is_empty());
    }
}

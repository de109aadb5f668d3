//! Base trait for all chunkers.

use crate::types::Chunk;

/// The core trait that all chunkers must implement.
///
/// A chunker takes the content of one document and splits it into chunks
/// that are suitable for embedding and retrieval. Chunking is total: any
/// string produces at least one chunk.
pub trait Chunker: Send + Sync {
    /// Get the name of this chunker.
    fn name(&self) -> &'static str;

    /// Chunk the given content.
    ///
    /// # Arguments
    /// * `content` - The document text
    /// * `file_name` - File name used for extension-based decisions
    ///
    /// # Returns
    /// The chunks in emission order, with `total_chunks` set on each.
    fn chunk(&self, content: &str, file_name: &str) -> Vec<Chunk>;

    /// Check if this chunker is meant for the given file.
    fn supports_file(&self, file_name: &str) -> bool {
        // By default, chunkers support all files
        let _ = file_name;
        true
    }

    /// Get the description of this chunker.
    fn description(&self) -> &'static str {
        "A text chunker"
    }
}

/// Byte offset of every character in `content`, followed by `content.len()`.
///
/// Indexing this with a character position gives a byte offset that is
/// always a valid slice boundary.
pub(crate) fn char_boundaries(content: &str) -> Vec<usize> {
    content
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(content.len()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_boundaries_ascii() {
        assert_eq!(char_boundaries("abc"), vec![0, 1, 2, 3]);
        assert_eq!(char_boundaries(""), vec![0]);
    }

    #[test]
    fn test_char_boundaries_multibyte() {
        let content = "añb";
        let offsets = char_boundaries(content);
        assert_eq!(offsets, vec![0, 1, 3, 4]);
        assert_eq!(&content[offsets[1]..offsets[2]], "ñ");
    }
}

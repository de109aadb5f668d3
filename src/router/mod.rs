//! Chunking strategy router.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::chunkers::{Chunker, CodeChunker, TextChunker};
use crate::enrichment::extract_code_metadata;
use crate::processing::is_code_file_for_chunking;
use crate::types::{Chunk, ChunkingConfig, CodeMetadata};

/// Which chunker handles a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkStrategy {
    /// Boundary-aware splitting for brace-structured source
    Code,
    /// Sliding-window splitting for everything else
    Text,
}

impl ChunkStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChunkStrategy::Code => "code",
            ChunkStrategy::Text => "text",
        }
    }
}

/// Router that selects the appropriate chunker based on the file name.
///
/// Brace-structured source files go to the code chunker, everything else
/// to the plain text chunker.
pub struct DocumentRouter {
    /// Plain sliding-window chunker
    text_chunker: Arc<TextChunker>,
    /// Boundary-aware code chunker
    code_chunker: Arc<CodeChunker>,
}

impl DocumentRouter {
    /// Create a new router with the given configuration.
    pub fn new(config: &ChunkingConfig) -> Self {
        Self {
            text_chunker: Arc::new(TextChunker::new(config.text)),
            code_chunker: Arc::new(CodeChunker::new(config.code)),
        }
    }

    /// Strategy used for the given file.
    pub fn route(&self, file_name: &str) -> ChunkStrategy {
        if is_code_file_for_chunking(file_name) {
            ChunkStrategy::Code
        } else {
            ChunkStrategy::Text
        }
    }

    /// Chunker implementing a strategy.
    pub fn chunker(&self, strategy: ChunkStrategy) -> Arc<dyn Chunker> {
        match strategy {
            ChunkStrategy::Code => Arc::clone(&self.code_chunker) as Arc<dyn Chunker>,
            ChunkStrategy::Text => Arc::clone(&self.text_chunker) as Arc<dyn Chunker>,
        }
    }

    /// Chunk a document with the strategy its file name routes to.
    pub fn chunk(&self, content: &str, file_name: &str) -> Vec<Chunk> {
        self.chunker(self.route(file_name)).chunk(content, file_name)
    }

    /// Structural metadata for the file, if its language is supported.
    pub fn metadata(&self, content: &str, file_name: &str) -> Option<CodeMetadata> {
        extract_code_metadata(content, file_name)
    }

    /// Get a chunker by name.
    pub fn get_chunker_by_name(&self, name: &str) -> Option<Arc<dyn Chunker>> {
        match name.to_lowercase().as_str() {
            "code" | "source" => Some(self.chunker(ChunkStrategy::Code)),
            "text" | "plain" => Some(self.chunker(ChunkStrategy::Text)),
            _ => None,
        }
    }

    /// List all available chunkers.
    pub fn list_chunkers(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            (self.text_chunker.name(), self.text_chunker.description()),
            (self.code_chunker.name(), self.code_chunker.description()),
        ]
    }
}

impl Default for DocumentRouter {
    fn default() -> Self {
        Self::new(&ChunkingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CodeChunkOptions, TextChunkOptions};

    #[test]
    fn test_route_by_extension() {
        let router = DocumentRouter::default();

        assert_eq!(router.route("src/main.rs"), ChunkStrategy::Code);
        assert_eq!(router.route("Views/Home.cshtml"), ChunkStrategy::Code);
        assert_eq!(router.route("App.TSX"), ChunkStrategy::Code);
        assert_eq!(router.route("README.md"), ChunkStrategy::Text);
        assert_eq!(router.route("script.py"), ChunkStrategy::Text);
        assert_eq!(router.route("Makefile"), ChunkStrategy::Text);
    }

    #[test]
    fn test_chunk_uses_configured_options() {
        let config = ChunkingConfig {
            text: TextChunkOptions::with_size(100).with_overlap(10).with_threshold(50),
            code: CodeChunkOptions::with_target(100)
                .with_margin(20)
                .with_min_chunk_size(50)
                .with_threshold(50),
            ..Default::default()
        };
        let router = DocumentRouter::new(&config);

        let prose = "word ".repeat(100);
        let chunks = router.chunk(&prose, "notes.txt");
        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.len() <= 100));

        let code = "void f() {\n  g();\n}\n".repeat(30);
        let chunks = router.chunk(&code, "f.c");
        assert!(chunks.len() > 1);
        assert_eq!(chunks.iter().map(|c| c.text.as_str()).collect::<String>(), code);
    }

    #[test]
    fn test_metadata_only_for_supported_languages() {
        let router = DocumentRouter::default();
        assert!(router.metadata("class A {}", "A.java").is_some());
        assert!(router.metadata("fn main() {}", "main.rs").is_none());
    }

    #[test]
    fn test_get_chunker_by_name() {
        let router = DocumentRouter::default();

        assert_eq!(router.get_chunker_by_name("CODE").map(|c| c.name()), Some("code"));
        assert_eq!(router.get_chunker_by_name("plain").map(|c| c.name()), Some("text"));
        assert!(router.get_chunker_by_name("semantic").is_none());
    }

    #[test]
    fn test_list_chunkers() {
        let names: Vec<_> = DocumentRouter::default()
            .list_chunkers()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["text", "code"]);
    }
}

//! Configuration types for chunking.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::{
    DEFAULT_BATCH_CONCURRENCY, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE,
    DEFAULT_CHUNK_THRESHOLD, DEFAULT_CODE_MARGIN, DEFAULT_CODE_MIN_CHUNK_SIZE,
    DEFAULT_CODE_TARGET_SIZE, DEFAULT_MAX_CONTENT_SIZE,
};

/// Options for the plain sliding-window chunker. Sizes are in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChunkOptions {
    /// Maximum characters per chunk
    pub chunk_size: usize,

    /// Characters repeated from the end of one chunk at the start of the next
    pub overlap: usize,

    /// Content at or below this length is returned as a single chunk
    pub threshold: usize,
}

impl Default for TextChunkOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_CHUNK_OVERLAP,
            threshold: DEFAULT_CHUNK_THRESHOLD,
        }
    }
}

impl TextChunkOptions {
    /// Create options with the given chunk size.
    pub fn with_size(size: usize) -> Self {
        Self {
            chunk_size: size,
            ..Default::default()
        }
    }

    /// Set the overlap.
    pub fn with_overlap(mut self, overlap: usize) -> Self {
        self.overlap = overlap;
        self
    }

    /// Set the single-chunk threshold.
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    /// Chunk size and overlap clamped so that every window advances.
    pub(crate) fn effective(&self) -> (usize, usize) {
        let size = self.chunk_size.max(1);
        (size, self.overlap.min(size - 1))
    }

    /// Reject values that would be clamped at chunking time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroSize("chunk_size"));
        }
        if self.overlap >= self.chunk_size {
            return Err(ConfigError::OverlapTooLarge {
                overlap: self.overlap,
                chunk_size: self.chunk_size,
            });
        }
        Ok(())
    }
}

/// Options for the boundary-aware code chunker. Sizes are in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeChunkOptions {
    /// Preferred chunk length
    pub target_size: usize,

    /// How far a split may move away from the target to land on a boundary
    pub margin: usize,

    /// Lower bound of the acceptable window
    pub min_chunk_size: usize,

    /// Content at or below this length is returned as a single chunk
    pub threshold: usize,
}

impl Default for CodeChunkOptions {
    fn default() -> Self {
        Self {
            target_size: DEFAULT_CODE_TARGET_SIZE,
            margin: DEFAULT_CODE_MARGIN,
            min_chunk_size: DEFAULT_CODE_MIN_CHUNK_SIZE,
            threshold: DEFAULT_CHUNK_THRESHOLD,
        }
    }
}

impl CodeChunkOptions {
    /// Create options with the given target size.
    pub fn with_target(target_size: usize) -> Self {
        Self {
            target_size,
            ..Default::default()
        }
    }

    /// Set the margin.
    pub fn with_margin(mut self, margin: usize) -> Self {
        self.margin = margin;
        self
    }

    /// Set the minimum chunk size.
    pub fn with_min_chunk_size(mut self, min_chunk_size: usize) -> Self {
        self.min_chunk_size = min_chunk_size;
        self
    }

    /// Set the single-chunk threshold.
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    /// Options for the plain chunker when code boundaries are not used.
    pub fn as_text_options(&self) -> TextChunkOptions {
        TextChunkOptions {
            chunk_size: self.target_size,
            overlap: DEFAULT_CHUNK_OVERLAP,
            threshold: self.threshold,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_size == 0 {
            return Err(ConfigError::ZeroSize("target_size"));
        }
        if self.min_chunk_size == 0 {
            return Err(ConfigError::ZeroSize("min_chunk_size"));
        }
        Ok(())
    }
}

/// Global configuration for the ingestion core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Options for plain text documents
    pub text: TextChunkOptions,

    /// Options for source files
    pub code: CodeChunkOptions,

    /// Documents prepared concurrently by the batch processor
    pub batch_concurrency: usize,

    /// Maximum content size per document (bytes)
    pub max_content_size: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            text: TextChunkOptions::default(),
            code: CodeChunkOptions::default(),
            batch_concurrency: DEFAULT_BATCH_CONCURRENCY,
            max_content_size: DEFAULT_MAX_CONTENT_SIZE,
        }
    }
}

impl ChunkingConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            text: TextChunkOptions {
                chunk_size: env_or("CHUNK_SIZE", DEFAULT_CHUNK_SIZE),
                overlap: env_or("CHUNK_OVERLAP", DEFAULT_CHUNK_OVERLAP),
                threshold: env_or("CHUNK_THRESHOLD", DEFAULT_CHUNK_THRESHOLD),
            },
            code: CodeChunkOptions {
                target_size: env_or("CODE_TARGET_SIZE", DEFAULT_CODE_TARGET_SIZE),
                margin: env_or("CODE_MARGIN", DEFAULT_CODE_MARGIN),
                min_chunk_size: env_or("CODE_MIN_CHUNK_SIZE", DEFAULT_CODE_MIN_CHUNK_SIZE),
                threshold: env_or("CODE_CHUNK_THRESHOLD", DEFAULT_CHUNK_THRESHOLD),
            },
            batch_concurrency: env_or("BATCH_CONCURRENCY", DEFAULT_BATCH_CONCURRENCY),
            max_content_size: env_or("MAX_CONTENT_SIZE", DEFAULT_MAX_CONTENT_SIZE),
        }
    }

    /// Validate every option set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.text.validate()?;
        self.code.validate()?;
        if self.batch_concurrency == 0 {
            return Err(ConfigError::ZeroSize("batch_concurrency"));
        }
        Ok(())
    }
}

fn env_or(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ChunkingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_effective_clamps_overlap() {
        let options = TextChunkOptions::with_size(300).with_overlap(400);
        assert_eq!(options.effective(), (300, 299));

        let options = TextChunkOptions::with_size(0).with_overlap(5);
        assert_eq!(options.effective(), (1, 0));
    }

    #[test]
    fn test_validate_rejects_stalling_values() {
        let err = TextChunkOptions::with_size(100).with_overlap(100).validate();
        assert!(matches!(err, Err(ConfigError::OverlapTooLarge { .. })));

        let err = CodeChunkOptions::with_target(0).validate();
        assert!(matches!(err, Err(ConfigError::ZeroSize("target_size"))));

        let config = ChunkingConfig {
            batch_concurrency: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_env() {
        std::env::set_var("CODE_MARGIN", "321");
        std::env::set_var("BATCH_CONCURRENCY", "not-a-number");
        let config = ChunkingConfig::from_env();
        std::env::remove_var("CODE_MARGIN");
        std::env::remove_var("BATCH_CONCURRENCY");

        assert_eq!(config.code.margin, 321);
        assert_eq!(config.batch_concurrency, DEFAULT_BATCH_CONCURRENCY);
    }

    #[test]
    fn test_code_fallback_options() {
        let options = CodeChunkOptions::with_target(1200).with_threshold(50);
        let text = options.as_text_options();
        assert_eq!(text.chunk_size, 1200);
        assert_eq!(text.threshold, 50);
        assert_eq!(text.overlap, DEFAULT_CHUNK_OVERLAP);
    }
}

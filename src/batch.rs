//! Batch processing utilities for large-scale ingestion.

use std::sync::Arc;

use anyhow::Result;
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::error::IngestError;
use crate::ingest::{prepare_document, prepare_document_with, PreparedDocument};
use crate::router::{ChunkStrategy, DocumentRouter};
use crate::types::{ChunkingConfig, Document};
use crate::{DEFAULT_BATCH_CONCURRENCY, DEFAULT_MAX_CONTENT_SIZE};

/// Configuration for batch processing.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Maximum documents to prepare concurrently
    pub concurrency: usize,
    /// Whether to continue on individual document failures
    pub continue_on_error: bool,
    /// Maximum content size per document (bytes)
    pub max_content_size: usize,
    /// Strategy for every document instead of routing by extension
    pub strategy: Option<ChunkStrategy>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_BATCH_CONCURRENCY,
            continue_on_error: true,
            max_content_size: DEFAULT_MAX_CONTENT_SIZE,
            strategy: None,
        }
    }
}

impl From<&ChunkingConfig> for BatchConfig {
    fn from(config: &ChunkingConfig) -> Self {
        Self {
            concurrency: config.batch_concurrency,
            max_content_size: config.max_content_size,
            ..Default::default()
        }
    }
}

/// Result of batch processing.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub total_documents: usize,
    pub processed_documents: usize,
    pub failed_documents: usize,
    pub total_chunks: usize,
    pub errors: Vec<BatchError>,
}

/// Error during batch processing.
#[derive(Debug, Clone)]
pub struct BatchError {
    pub source_path: String,
    pub error: String,
}

/// Batch processor that prepares many documents on a bounded worker pool.
pub struct BatchProcessor {
    router: Arc<DocumentRouter>,
    config: BatchConfig,
}

impl BatchProcessor {
    /// Create a new batch processor.
    pub fn new(router: Arc<DocumentRouter>, config: BatchConfig) -> Self {
        Self { router, config }
    }

    /// Prepare a batch of documents.
    ///
    /// Documents are chunked on the blocking pool, at most `concurrency` at a
    /// time, and returned in input order. Failed documents are recorded in
    /// the result and skipped, or abort the batch when `continue_on_error`
    /// is off.
    pub async fn process_batch(
        &self,
        documents: Vec<Document>,
    ) -> Result<(Vec<PreparedDocument>, BatchResult)> {
        let total_documents = documents.len();
        let mut prepared = Vec::with_capacity(total_documents);
        let mut result = BatchResult {
            total_documents,
            ..Default::default()
        };

        info!(total_documents, concurrency = self.config.concurrency, "Starting batch processing");

        let mut outcomes = stream::iter(documents)
            .map(|document| self.process_single_document(document))
            .buffered(self.config.concurrency.max(1));

        while let Some((source_path, outcome)) = outcomes.next().await {
            match outcome {
                Ok(document) => {
                    result.total_chunks += document.chunks.len();
                    result.processed_documents += 1;
                    prepared.push(document);
                }
                Err(e) => {
                    result.failed_documents += 1;
                    result.errors.push(BatchError {
                        source_path: source_path.clone(),
                        error: e.to_string(),
                    });

                    if !self.config.continue_on_error {
                        return Err(e.into());
                    }

                    warn!(source_path = %source_path, error = %e, "Failed to process document");
                }
            }
        }

        info!(
            processed = result.processed_documents,
            failed = result.failed_documents,
            chunks = result.total_chunks,
            "Batch processing complete"
        );

        Ok((prepared, result))
    }

    /// Prepare one document on the blocking pool.
    async fn process_single_document(
        &self,
        document: Document,
    ) -> (String, Result<PreparedDocument, IngestError>) {
        let source_path = document.source_path.clone();

        let size = document.content.len();
        if size > self.config.max_content_size {
            debug!(source_path = %source_path, size, "Content exceeds max size");
            return (
                source_path.clone(),
                Err(IngestError::ContentTooLarge {
                    path: source_path,
                    size,
                    limit: self.config.max_content_size,
                }),
            );
        }

        let router = Arc::clone(&self.router);
        let strategy = self.config.strategy;
        let outcome = tokio::task::spawn_blocking(move || match strategy {
            Some(strategy) => prepare_document_with(&router, &document, strategy),
            None => prepare_document(&router, &document),
        })
        .await
        .map_err(|e| IngestError::Worker {
            path: source_path.clone(),
            message: e.to_string(),
        });

        (source_path, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TextChunkOptions;

    fn router() -> Arc<DocumentRouter> {
        let config = ChunkingConfig {
            text: TextChunkOptions::with_size(50).with_overlap(5).with_threshold(20),
            ..Default::default()
        };
        Arc::new(DocumentRouter::new(&config))
    }

    fn documents() -> Vec<Document> {
        (0..10)
            .map(|i| Document::new(format!("docs/{i}.md"), "kb", "text ".repeat(10 * (i + 1))))
            .collect()
    }

    #[tokio::test]
    async fn test_preserves_input_order() {
        let processor = BatchProcessor::new(
            router(),
            BatchConfig {
                concurrency: 3,
                ..Default::default()
            },
        );

        let (prepared, result) = processor.process_batch(documents()).await.unwrap();

        let paths: Vec<_> = prepared.iter().map(|d| d.source_path.as_str()).collect();
        let expected: Vec<_> = (0..10).map(|i| format!("docs/{i}.md")).collect();
        assert_eq!(paths, expected);

        assert_eq!(result.total_documents, 10);
        assert_eq!(result.processed_documents, 10);
        assert_eq!(result.failed_documents, 0);
        assert_eq!(
            result.total_chunks,
            prepared.iter().map(|d| d.chunks.len()).sum::<usize>()
        );
    }

    #[tokio::test]
    async fn test_oversized_document_is_skipped() {
        let processor = BatchProcessor::new(
            router(),
            BatchConfig {
                max_content_size: 100,
                ..Default::default()
            },
        );

        let (prepared, result) = processor.process_batch(documents()).await.unwrap();

        // "text " * 10 * (i + 1) is 50 * (i + 1) bytes: only i = 0 and i = 1 fit.
        assert_eq!(prepared.len(), 2);
        assert_eq!(result.failed_documents, 8);
        assert_eq!(result.errors[0].source_path, "docs/2.md");
        assert!(result.errors[0].error.contains("above the 100 byte limit"));
    }

    #[tokio::test]
    async fn test_stop_on_first_error() {
        let processor = BatchProcessor::new(
            router(),
            BatchConfig {
                max_content_size: 100,
                continue_on_error: false,
                ..Default::default()
            },
        );

        let err = processor.process_batch(documents()).await.unwrap_err();
        match err.downcast_ref::<IngestError>() {
            Some(IngestError::ContentTooLarge { path, size, limit }) => {
                assert_eq!(path, "docs/2.md");
                assert_eq!(*size, 150);
                assert_eq!(*limit, 100);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let processor = BatchProcessor::new(router(), BatchConfig::default());
        let (prepared, result) = processor.process_batch(Vec::new()).await.unwrap();
        assert!(prepared.is_empty());
        assert_eq!(result.total_documents, 0);
    }

    #[tokio::test]
    async fn test_forced_strategy() {
        let processor = BatchProcessor::new(
            router(),
            BatchConfig {
                strategy: Some(ChunkStrategy::Code),
                ..Default::default()
            },
        );

        let (prepared, _) = processor.process_batch(documents()).await.unwrap();
        assert!(prepared.iter().all(|d| d.strategy == ChunkStrategy::Code));
    }

    #[test]
    fn test_config_from_chunking_config() {
        let config = ChunkingConfig {
            batch_concurrency: 7,
            max_content_size: 1234,
            ..Default::default()
        };
        let batch = BatchConfig::from(&config);
        assert_eq!(batch.concurrency, 7);
        assert_eq!(batch.max_content_size, 1234);
        assert!(batch.continue_on_error);
        assert_eq!(batch.strategy, None);
    }
}

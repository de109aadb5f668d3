//! Document preparation for indexing.
//!
//! Turns one document into the chunk records a vector store ingests: chunk
//! text and position, where it came from, content hashes and the file's
//! structural metadata. Also plans incremental re-indexing by comparing
//! chunk hashes against what is already stored.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use tracing::debug;
use uuid::Uuid;

use crate::error::IngestError;
use crate::router::{ChunkStrategy, DocumentRouter};
use crate::types::{Chunk, CodeMetadata, Document, SourceType};

/// Lowercase hex SHA-256 of `content`.
pub fn content_hash(content: &str) -> String {
    format!("{:x}", Sha256::digest(content.as_bytes()))
}

/// One chunk ready to be embedded and stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedChunk {
    /// Point identifier in the vector store
    pub id: Uuid,

    pub chunk: Chunk,

    /// Path of the source document
    pub source_path: String,

    pub project: String,

    pub source_type: SourceType,

    /// SHA-256 of the whole document
    pub content_hash: String,

    /// SHA-256 of this chunk's text
    pub chunk_hash: String,

    /// Metadata of the file the chunk came from, shared by all its chunks
    pub code_metadata: Option<CodeMetadata>,
}

impl IndexedChunk {
    /// Flat JSON payload stored next to the vector.
    pub fn payload(&self) -> Value {
        let mut payload = json!({
            "title": self.source_path,
            "content": self.chunk.text,
            "source_path": self.source_path,
            "project": self.project,
            "chunk_index": self.chunk.chunk_index,
            "total_chunks": self.chunk.total_chunks,
            "source_type": self.source_type,
            "content_hash": self.content_hash,
        });

        if let (Some(meta), Some(fields)) = (&self.code_metadata, payload.as_object_mut()) {
            fields.insert("file_name".into(), json!(meta.file_name));
            fields.insert("class_names".into(), json!(meta.class_names));
            fields.insert("property_names".into(), json!(meta.property_names));
            fields.insert("referenced_types".into(), json!(meta.referenced_types));
        }

        payload
    }
}

/// All chunk records of one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedDocument {
    pub source_path: String,
    pub chunks: Vec<IndexedChunk>,
    pub code_metadata: Option<CodeMetadata>,
    pub strategy: ChunkStrategy,
}

impl PreparedDocument {
    /// Chunk hashes in chunk order.
    pub fn chunk_hashes(&self) -> Vec<&str> {
        self.chunks.iter().map(|c| c.chunk_hash.as_str()).collect()
    }
}

/// Chunk a document and attach hashes and metadata to every chunk.
pub fn prepare_document(router: &DocumentRouter, document: &Document) -> PreparedDocument {
    let strategy = router.route(document.file_name());
    prepare_document_with(router, document, strategy)
}

/// Like [`prepare_document`], with the chunking strategy chosen by the caller.
pub fn prepare_document_with(
    router: &DocumentRouter,
    document: &Document,
    strategy: ChunkStrategy,
) -> PreparedDocument {
    let file_name = document.file_name();
    let chunks = router.chunker(strategy).chunk(&document.content, file_name);
    let code_metadata = router.metadata(&document.content, file_name);

    let source_type = if strategy == ChunkStrategy::Code || code_metadata.is_some() {
        SourceType::Code
    } else {
        SourceType::Doc
    };
    let document_hash = content_hash(&document.content);

    debug!(
        source_path = %document.source_path,
        strategy = strategy.as_str(),
        chunks = chunks.len(),
        has_metadata = code_metadata.is_some(),
        "Prepared document"
    );

    let chunks = chunks
        .into_iter()
        .map(|chunk| IndexedChunk {
            id: Uuid::new_v4(),
            chunk_hash: content_hash(&chunk.text),
            chunk,
            source_path: document.source_path.clone(),
            project: document.project.clone(),
            source_type,
            content_hash: document_hash.clone(),
            code_metadata: code_metadata.clone(),
        })
        .collect();

    PreparedDocument {
        source_path: document.source_path.clone(),
        chunks,
        code_metadata,
        strategy,
    }
}

/// Which chunks of a re-indexed document need new embeddings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReindexPlan {
    /// Chunk indices whose text is unchanged, with the matching chunk hash
    pub reuse: Vec<(usize, String)>,

    /// Chunk indices that must be embedded
    pub embed: Vec<usize>,
}

impl ReindexPlan {
    /// Check whether every chunk can reuse a stored vector.
    pub fn is_unchanged(&self) -> bool {
        self.embed.is_empty()
    }
}

/// Compare a freshly prepared document with the chunk texts stored for its
/// previous version.
pub fn plan_reindex<S: AsRef<str>>(prepared: &PreparedDocument, previous_texts: &[S]) -> ReindexPlan {
    let previous: HashSet<String> = previous_texts
        .iter()
        .map(|text| content_hash(text.as_ref()))
        .collect();

    let mut plan = ReindexPlan::default();
    for (i, chunk) in prepared.chunks.iter().enumerate() {
        if previous.contains(&chunk.chunk_hash) {
            plan.reuse.push((i, chunk.chunk_hash.clone()));
        } else {
            plan.embed.push(i);
        }
    }

    debug!(
        source_path = %prepared.source_path,
        reused = plan.reuse.len(),
        embed = plan.embed.len(),
        "Planned re-index"
    );

    plan
}

/// Read a document from disk.
pub async fn load_document(path: impl AsRef<Path>, project: &str) -> Result<Document, IngestError> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| IngestError::Read {
            path: path.display().to_string(),
            source,
        })?;

    Ok(Document::new(path.display().to_string(), project, content))
}

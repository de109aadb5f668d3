//! Document types handed to the ingestion core.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Whether a document is program source or prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Code,
    Doc,
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceType::Code => write!(f, "code"),
            SourceType::Doc => write!(f, "doc"),
        }
    }
}

/// A document to be chunked.
///
/// This is the input unit received from the ingestion pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Path of the document inside its project (used as title)
    pub source_path: String,

    /// Project or knowledge-base partition the document belongs to
    #[serde(default)]
    pub project: String,

    /// Raw text content
    pub content: String,
}

impl Document {
    /// Create a new document.
    pub fn new(source_path: impl Into<String>, project: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            project: project.into(),
            content: content.into(),
        }
    }

    /// Last path component, which is what extension routing looks at.
    pub fn file_name(&self) -> &str {
        Path::new(&self.source_path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.source_path)
    }
}

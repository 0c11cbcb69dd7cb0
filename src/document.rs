//! Document records and summaries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ingestion payload for a single document.
///
/// `id`, `title`, `author`, and `text` are required; metadata is optional
/// and defaults to empty. Empty text is accepted and produces a document
/// with zero segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSource {
    pub id: String,
    pub title: String,
    pub author: String,
    pub text: String,
    #[serde(default)]
    pub metadata: DocumentMetadata,
}

impl DocumentSource {
    /// Create a payload with empty metadata.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            text: text.into(),
            metadata: DocumentMetadata::default(),
        }
    }

    /// Attach metadata to the payload.
    pub fn with_metadata(mut self, metadata: DocumentMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Optional descriptive metadata carried by a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Free-form kind label, e.g. "manual", "reference", "theory".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Topic labels.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<String>,

    /// Publication year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

/// An ingested document. Immutable once stored; re-ingesting the same id
/// replaces the whole record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub author: String,

    /// The full original text, kept for re-chunking and display.
    pub text: String,

    pub metadata: DocumentMetadata,

    /// When the document entered the library.
    pub added_at: DateTime<Utc>,

    /// Whitespace-token count of `text`.
    pub word_count: usize,

    /// Segment ids in tiling order.
    pub segment_ids: Vec<String>,
}

impl Document {
    /// The id/title/author triple attached to segment views.
    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            author: self.author.clone(),
        }
    }

    /// The listing row reported by `Library::list_documents`.
    pub fn overview(&self) -> DocumentOverview {
        DocumentOverview {
            id: self.id.clone(),
            title: self.title.clone(),
            author: self.author.clone(),
            word_count: self.word_count,
            segment_count: self.segment_ids.len(),
            metadata: self.metadata.clone(),
        }
    }
}

/// Identifying fields of a document, attached to retrieval views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: String,
    pub title: String,
    pub author: String,
}

/// One row of the library's document listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentOverview {
    pub id: String,
    pub title: String,
    pub author: String,
    pub word_count: usize,
    pub segment_count: usize,
    pub metadata: DocumentMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn metadata_defaults_to_empty() {
        let source = DocumentSource::new("d1", "Title", "Author", "text");
        assert_eq!(source.metadata, DocumentMetadata::default());
    }

    #[test]
    fn source_deserializes_without_metadata() {
        let source: DocumentSource = serde_json::from_str(
            r#"{"id":"d1","title":"Title","author":"Author","text":"text"}"#,
        )
        .unwrap();
        assert_eq!(source.metadata.kind, None);
        assert!(source.metadata.topics.is_empty());
    }
}

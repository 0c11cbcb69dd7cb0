//! The library store: ownership and lifecycle of documents, segments, and
//! the global inverted index.
//!
//! Ingestion runs chunker → classifier → index builder and stores the
//! results; every query operation is a read. All operations are
//! synchronous and in-memory. `ingest` takes `&mut self` while queries
//! take `&self`, so mutation and reads cannot interleave on one value;
//! share a library across threads by wrapping it in `std::sync::RwLock`.

use chrono::Utc;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::chunker::{Chunker, ChunkerConfig};
use crate::classifier::Classifier;
use crate::document::{Document, DocumentOverview, DocumentSource, DocumentSummary};
use crate::error::{LibraryError, Result};
use crate::index::InvertedIndex;
use crate::pattern::{PatternCriteria, PatternMatcher};
use crate::search::{RetrievalEngine, SearchResult};
use crate::segment::{ContextWindow, Segment};
use crate::taxonomy::Taxonomy;

/// What to do when an ingested id is already present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Replace the stored document and its segments. Entries the prior
    /// ingestion left in the global index are not purged.
    #[default]
    Overwrite,

    /// Refuse with `LibraryError::DuplicateDocument`.
    Reject,
}

/// Library construction parameters.
#[derive(Debug, Clone, Default)]
pub struct LibraryConfig {
    pub chunker: ChunkerConfig,
    pub duplicate_policy: DuplicatePolicy,
}

/// Aggregate counts reported by `Library::stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryStats {
    pub document_count: usize,
    pub segment_count: usize,
    /// Distinct keys in the global index. Monotonic: overwriting a
    /// document never removes keys.
    pub index_size: usize,
    pub total_words: usize,
}

/// A segment together with its owning document's summary and its context
/// window, as returned by lookups and pattern scans.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentView<'a> {
    pub segment: &'a Segment,
    pub document: DocumentSummary,
    pub context: &'a ContextWindow,
}

/// An in-memory library of chunked, classified, indexed documents.
pub struct Library {
    duplicate_policy: DuplicatePolicy,
    chunker: Chunker,
    classifier: Classifier,
    retrieval: RetrievalEngine,
    matcher: PatternMatcher,

    documents: IndexMap<String, Document>,
    segments: IndexMap<String, Segment>,
    index: InvertedIndex,
}

impl Library {
    /// An empty library with default window geometry and taxonomy.
    pub fn new() -> Self {
        Self::with_parts(LibraryConfig::default(), Taxonomy::default())
    }

    /// An empty library with custom construction parameters.
    pub fn with_config(config: LibraryConfig) -> Self {
        Self::with_parts(config, Taxonomy::default())
    }

    /// An empty library classifying against a custom taxonomy.
    pub fn with_taxonomy(taxonomy: Taxonomy) -> Self {
        Self::with_parts(LibraryConfig::default(), taxonomy)
    }

    /// An empty library with custom parameters and taxonomy.
    pub fn with_parts(config: LibraryConfig, taxonomy: Taxonomy) -> Self {
        Self {
            duplicate_policy: config.duplicate_policy,
            chunker: Chunker::with_config(config.chunker),
            classifier: Classifier::with_taxonomy(taxonomy),
            retrieval: RetrievalEngine,
            matcher: PatternMatcher,
            documents: IndexMap::new(),
            segments: IndexMap::new(),
            index: InvertedIndex::new(),
        }
    }

    /// Ingest one document: tile it, classify every segment, index the
    /// tags, and store everything.
    ///
    /// Fails on invalid chunk geometry (nothing is stored) or, under
    /// `DuplicatePolicy::Reject`, on an id that is already present.
    pub fn ingest(&mut self, source: DocumentSource) -> Result<&Document> {
        if self.documents.contains_key(&source.id) {
            match self.duplicate_policy {
                DuplicatePolicy::Reject => {
                    return Err(LibraryError::DuplicateDocument(source.id));
                }
                DuplicatePolicy::Overwrite => self.evict(&source.id),
            }
        }

        let mut segments = self.chunker.chunk(&source.text, &source.id)?;
        for segment in &mut segments {
            let (entities, sentences) = self.classifier.classify(&segment.text);
            segment.entities = entities;
            segment.sentences = sentences;
        }

        let document_index = InvertedIndex::for_segments(&segments);
        self.index.merge(&document_index);

        let document = Document {
            id: source.id.clone(),
            title: source.title,
            author: source.author,
            word_count: source.text.split_whitespace().count(),
            text: source.text,
            metadata: source.metadata,
            added_at: Utc::now(),
            segment_ids: segments.iter().map(|segment| segment.id.clone()).collect(),
        };

        info!(
            "Ingested document {}: {} segments, {} words",
            document.id,
            segments.len(),
            document.word_count
        );

        for segment in segments {
            self.segments.insert(segment.id.clone(), segment);
        }
        Ok(self.documents.entry(source.id).or_insert(document))
    }

    /// Drop a document record and its segments ahead of re-ingestion.
    /// The global index keeps whatever the prior ingestion appended.
    fn evict(&mut self, document_id: &str) {
        if let Some(prior) = self.documents.shift_remove(document_id) {
            for segment_id in &prior.segment_ids {
                self.segments.shift_remove(segment_id);
            }
            debug!(
                "Replacing document {document_id}; {} prior segments dropped, index left as-is",
                prior.segment_ids.len()
            );
        }
    }

    /// Ranked free-text search. See [`RetrievalEngine::search`].
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        self.retrieval.search(query, self)
    }

    /// Conjunctive pattern scan. See [`PatternMatcher::find_pattern`].
    pub fn find_pattern(&self, criteria: &PatternCriteria) -> Vec<SegmentView<'_>> {
        self.matcher.find_pattern(criteria, self)
    }

    /// A segment with its document summary and context window, or `None`
    /// for an unknown id.
    pub fn segment_with_context(&self, segment_id: &str) -> Option<SegmentView<'_>> {
        let segment = self.segments.get(segment_id)?;
        let document = self.documents.get(&segment.document_id)?;
        Some(SegmentView {
            segment,
            document: document.summary(),
            context: &segment.context,
        })
    }

    pub fn stats(&self) -> LibraryStats {
        LibraryStats {
            document_count: self.documents.len(),
            segment_count: self.segments.len(),
            index_size: self.index.len(),
            total_words: self.documents.values().map(|doc| doc.word_count).sum(),
        }
    }

    /// One overview row per document, in ingestion order.
    pub fn list_documents(&self) -> Vec<DocumentOverview> {
        self.documents.values().map(Document::overview).collect()
    }

    pub fn document(&self, id: &str) -> Option<&Document> {
        self.documents.get(id)
    }

    pub fn segment(&self, id: &str) -> Option<&Segment> {
        self.segments.get(id)
    }

    /// All documents in ingestion order.
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    /// All segments in ingestion order, then tiling order.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.values()
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    /// The classifier used at ingestion, shared with query parsing.
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        self.classifier.taxonomy()
    }
}

impl Default for Library {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::document::DocumentMetadata;

    fn source(id: &str, text: &str) -> DocumentSource {
        DocumentSource::new(id, format!("Title {id}"), "A. Reader", text)
    }

    #[test]
    fn ingest_stores_document_segments_and_index() {
        let mut library = Library::new();
        let document = library
            .ingest(source("b1", "Gate 25 sits in the g center."))
            .unwrap();

        assert_eq!(document.word_count, 7);
        assert_eq!(document.segment_ids, vec!["b1-seg-0"]);

        let stats = library.stats();
        assert_eq!(stats.document_count, 1);
        assert_eq!(stats.segment_count, 1);
        assert_eq!(stats.total_words, 7);
        // gate-25 and center-g.
        assert_eq!(stats.index_size, 2);
    }

    #[test]
    fn invalid_geometry_stores_nothing() {
        let mut library = Library::with_config(LibraryConfig {
            chunker: ChunkerConfig {
                window_size: 10,
                overlap: 10,
                context_words: 50,
            },
            duplicate_policy: DuplicatePolicy::default(),
        });
        let err = library.ingest(source("b1", "some words here")).unwrap_err();
        assert!(matches!(err, LibraryError::InvalidChunkConfig { .. }));
        assert_eq!(library.stats().document_count, 0);
        assert_eq!(library.stats().segment_count, 0);
    }

    #[test]
    fn empty_text_degrades_to_zero_segments() {
        let mut library = Library::new();
        let document = library.ingest(source("empty", "")).unwrap();
        assert_eq!(document.word_count, 0);
        assert!(document.segment_ids.is_empty());
        assert_eq!(library.stats().segment_count, 0);
    }

    #[test]
    fn overwrite_is_the_default_duplicate_policy() {
        let mut library = Library::new();
        library.ingest(source("b1", "Gate 25 in the throat.")).unwrap();
        let index_size_before = library.stats().index_size;

        library.ingest(source("b1", "Gate 25 in the spleen.")).unwrap();

        assert_eq!(library.stats().document_count, 1);
        assert_eq!(library.stats().segment_count, 1);
        assert_eq!(
            library.document("b1").unwrap().text,
            "Gate 25 in the spleen."
        );
        // The index never shrinks: center-throat survives, gate-25 holds
        // both ingestions' entries.
        assert!(library.stats().index_size >= index_size_before);
        assert_eq!(
            library.index().lookup(crate::index::EntityKind::Gate, "25"),
            ["b1-seg-0", "b1-seg-0"]
        );
    }

    #[test]
    fn stale_index_entries_do_not_leak_into_search() {
        let mut library = Library::new();
        library.ingest(source("b1", "Gate 25 in the throat.")).unwrap();
        library.ingest(source("b1", "Gate 25 in the spleen.")).unwrap();

        // gate-25 lists b1-seg-0 twice; dedup keeps one result, resolved
        // against the current segment.
        let results = library.search("gate 25");
        assert_eq!(results.len(), 1);

        // center-throat now resolves to a segment that no longer carries
        // the tag, an accepted artifact of the append-only index.
        let results = library.search("throat");
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn reject_policy_refuses_duplicates() {
        let mut library = Library::with_config(LibraryConfig {
            chunker: ChunkerConfig::default(),
            duplicate_policy: DuplicatePolicy::Reject,
        });
        library.ingest(source("b1", "Gate 25 in the throat.")).unwrap();
        let err = library.ingest(source("b1", "anything else")).unwrap_err();
        assert_eq!(err, LibraryError::DuplicateDocument("b1".to_string()));
        assert_eq!(
            library.document("b1").unwrap().text,
            "Gate 25 in the throat."
        );
    }

    #[test]
    fn list_documents_reports_overviews_in_ingestion_order() {
        let mut library = Library::new();
        library
            .ingest(
                source("b1", "Gate 25 in the throat.").with_metadata(DocumentMetadata {
                    kind: Some("manual".to_string()),
                    topics: vec!["gates".to_string()],
                    year: Some(2024),
                }),
            )
            .unwrap();
        library.ingest(source("b2", "The sacral responds.")).unwrap();

        let listing = library.list_documents();
        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].id, "b1");
        assert_eq!(listing[0].segment_count, 1);
        assert_eq!(listing[0].metadata.kind.as_deref(), Some("manual"));
        assert_eq!(listing[1].id, "b2");
    }

    #[test]
    fn segment_with_context_resolves_summary_and_window() {
        let mut library = Library::with_config(LibraryConfig {
            chunker: ChunkerConfig {
                window_size: 4,
                overlap: 1,
                context_words: 2,
            },
            duplicate_policy: DuplicatePolicy::default(),
        });
        library
            .ingest(source("b1", "one two three four five six seven"))
            .unwrap();

        let view = library.segment_with_context("b1-seg-1").unwrap();
        assert_eq!(view.document.id, "b1");
        assert_eq!(view.document.title, "Title b1");
        assert_eq!(view.segment.text, "four five six seven");
        assert_eq!(view.context.before, Some("two three".to_string()));
        assert_eq!(view.context.after, None);
    }

    #[test]
    fn unknown_segment_id_is_a_none_lookup() {
        let library = Library::new();
        assert!(library.segment_with_context("nope-seg-0").is_none());
    }

    #[test]
    fn custom_taxonomy_drives_classification() {
        let mut taxonomy = Taxonomy::default();
        taxonomy.gate_range = 1..=8;
        let mut library = Library::with_taxonomy(taxonomy);
        library
            .ingest(source("b1", "Gate 7 is valid here but gate 25 is not."))
            .unwrap();

        let segment = library.segment("b1-seg-0").unwrap();
        assert_eq!(segment.entities.gates, vec![7]);
    }
}

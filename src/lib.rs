//! # Grimoire
//!
//! An in-memory engine for long-form text libraries. It provides:
//!
//! - **Windowed chunking**: documents tiled into overlapping word-window
//!   segments with display context
//! - **Entity tagging**: deterministic classification of gate, center,
//!   planet, element, concept, and number references per segment
//! - **Sentence analysis**: a structural tag for every retained sentence
//! - **Inverted indexing**: per-document indexes merged additively into a
//!   library-wide index
//! - **Ranked retrieval**: structured index lookups blended with a lexical
//!   full scan, deduplicated and score-ordered
//! - **Pattern queries**: conjunctive entity/structure scans over every
//!   segment
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                         Library                            │
//! ├────────────────────────────────────────────────────────────┤
//! │  ingest ──► Chunker ──► Classifier ──► InvertedIndex       │
//! │                              │              │              │
//! │                          Taxonomy        (global,          │
//! │                                         append-only)       │
//! │                                                            │
//! │  RetrievalEngine ◄── search      PatternMatcher ◄── scan   │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Ingestion is the only mutation; retrieval and pattern matching are
//! stateless reads over the library's collections. Persistence is out of
//! scope: the library lives and dies in memory.
//!
//! ## Usage
//!
//! ```
//! use grimoire::{DocumentSource, Library, MatchKind};
//!
//! let mut library = Library::new();
//! library.ingest(DocumentSource::new(
//!     "b1",
//!     "Motor Centers",
//!     "A. Reader",
//!     "Gate 25 represents innocence and fire. The sacral center and throat are motor centers.",
//! ))?;
//!
//! let results = library.search("gate 25");
//! assert_eq!(results[0].score, 1.0);
//! assert_eq!(results[0].match_kind, MatchKind::Gate);
//! # Ok::<(), grimoire::LibraryError>(())
//! ```

pub mod chunker;
pub mod classifier;
pub mod document;
pub mod error;
pub mod index;
pub mod library;
pub mod pattern;
pub mod search;
pub mod segment;
pub mod taxonomy;

pub use chunker::{Chunker, ChunkerConfig};
pub use classifier::Classifier;
pub use document::{Document, DocumentMetadata, DocumentOverview, DocumentSource, DocumentSummary};
pub use error::{LibraryError, Result};
pub use index::{EntityKind, InvertedIndex};
pub use library::{DuplicatePolicy, Library, LibraryConfig, LibraryStats, SegmentView};
pub use pattern::{PatternCriteria, PatternMatcher};
pub use search::{MatchKind, RetrievalEngine, SearchResult};
pub use segment::{ContextWindow, EntityTags, Segment, Sentence, SentenceStructure};
pub use taxonomy::{LexiconEntry, Taxonomy};

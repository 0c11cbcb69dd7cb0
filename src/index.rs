//! Inverted index over tagged entity values.
//!
//! The index maps `{kind}-{value}` keys (e.g. `gate-25`, `center-sacral`)
//! to insertion-ordered lists of segment ids. The library-wide index is
//! append-only: merging a document's index never replaces or deduplicates
//! existing entries, so its size grows monotonically with every ingestion.
//! Reclaiming space after document replacement means rebuilding from the
//! live document set.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::segment::Segment;

/// The entity categories a segment can be tagged with.
///
/// Only the first four feed the inverted index; elements and numbers stay
/// on the segment's tag set for pattern scans and external observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Gate,
    Center,
    Planet,
    Concept,
    Element,
    Number,
}

impl EntityKind {
    /// Key prefix used in the index.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gate => "gate",
            Self::Center => "center",
            Self::Planet => "planet",
            Self::Concept => "concept",
            Self::Element => "element",
            Self::Number => "number",
        }
    }
}

/// Insertion-ordered multimap from entity keys to segment id lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvertedIndex {
    entries: IndexMap<String, Vec<String>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the per-document index for a classified segment run.
    ///
    /// Segments are visited in tiling order; within each segment the
    /// indexed categories run in fixed order (gates, centers, planets,
    /// concepts), each category's values in their first-seen order.
    pub fn for_segments<'a>(segments: impl IntoIterator<Item = &'a Segment>) -> Self {
        let mut index = Self::new();
        for segment in segments {
            for gate in &segment.entities.gates {
                index.insert(EntityKind::Gate, &gate.to_string(), &segment.id);
            }
            for center in &segment.entities.centers {
                index.insert(EntityKind::Center, center, &segment.id);
            }
            for planet in &segment.entities.planets {
                index.insert(EntityKind::Planet, planet, &segment.id);
            }
            for concept in &segment.entities.concepts {
                index.insert(EntityKind::Concept, concept, &segment.id);
            }
        }
        index
    }

    /// Append one segment id under a key, creating the key if absent.
    pub fn insert(&mut self, kind: EntityKind, value: &str, segment_id: &str) {
        self.entries
            .entry(Self::key(kind, value))
            .or_default()
            .push(segment_id.to_string());
    }

    /// Segment ids recorded under a key, in insertion order. Empty when
    /// the key was never indexed.
    pub fn lookup(&self, kind: EntityKind, value: &str) -> &[String] {
        self.entries
            .get(&Self::key(kind, value))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Append every list of `document_index` onto this index.
    pub fn merge(&mut self, document_index: &InvertedIndex) {
        for (key, segment_ids) in &document_index.entries {
            self.entries
                .entry(key.clone())
                .or_default()
                .extend(segment_ids.iter().cloned());
        }
        debug!(
            "Merged {} index keys; global index now holds {}",
            document_index.entries.len(),
            self.entries.len()
        );
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    fn key(kind: EntityKind, value: &str) -> String {
        format!("{}-{value}", kind.as_str())
    }
}

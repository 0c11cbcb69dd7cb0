//! Windowed text segments and their derived classifications.

use serde::{Deserialize, Serialize};

/// Up to `context_words` words immediately outside a segment's span.
/// `None` at document boundaries. Display only, never indexed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextWindow {
    pub before: Option<String>,
    pub after: Option<String>,
}

/// Structural shape of a single sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentenceStructure {
    /// No disjunction, nesting, or symmetry detected.
    SimpleLinear,
    /// Some word in the first half recurs at the mirror position of the
    /// second half.
    Mirror,
    /// Two or more commas, read as embedded clauses.
    Nested,
    /// Contains a disjunction keyword (or, either, neither, versus, vs).
    BinarySplit,
}

/// One sentence of a segment with its structural classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Ordinal among the segment's retained sentences.
    pub index: usize,

    /// Trimmed sentence text, terminal punctuation stripped by splitting.
    pub text: String,

    pub word_count: usize,

    pub structure: SentenceStructure,
}

/// Per-category deduplicated entity values found in one segment.
///
/// Values keep first-seen order within each category. Gates, centers,
/// planets, and concepts feed the inverted index; elements and numbers are
/// carried for pattern scans and external observers only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityTags {
    /// Gate numbers referenced as an explicit "gate N" phrase, validated
    /// against the taxonomy range.
    pub gates: Vec<u8>,

    /// Canonical center names.
    pub centers: Vec<String>,

    /// Canonical planet names.
    pub planets: Vec<String>,

    /// Element names not already captured as planets.
    pub elements: Vec<String>,

    /// Concept lexicon hits.
    pub concepts: Vec<String>,

    /// Every standalone one- or two-digit number, range-unvalidated.
    pub numbers: Vec<u8>,
}

impl EntityTags {
    /// True when no category matched anything.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
            && self.centers.is_empty()
            && self.planets.is_empty()
            && self.elements.is_empty()
            && self.concepts.is_empty()
            && self.numbers.is_empty()
    }
}

/// A windowed tile of a document with its derived classifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// `{document_id}-seg-{ordinal}`.
    pub id: String,

    /// Owning document id. The document itself lives in the library store.
    pub document_id: String,

    /// First word offset of the span, inclusive.
    pub start: usize,

    /// Last word offset of the span, exclusive.
    pub end: usize,

    /// Span words joined by single spaces.
    pub text: String,

    pub word_count: usize,

    pub context: ContextWindow,

    pub entities: EntityTags,

    pub sentences: Vec<Sentence>,
}

impl Segment {
    /// Whether any sentence in the segment carries the given structure tag.
    pub fn has_structure(&self, structure: SentenceStructure) -> bool {
        self.sentences
            .iter()
            .any(|sentence| sentence.structure == structure)
    }
}

//! Conjunctive pattern queries over classified segments.
//!
//! Pattern matching bypasses the inverted index entirely: it scans every
//! segment in insertion order (document ingestion order, then tiling
//! order) and keeps those satisfying every supplied criterion.

use serde::{Deserialize, Serialize};

use crate::library::{Library, SegmentView};
use crate::segment::{Segment, SentenceStructure};

/// Criteria for a pattern scan. Omitted fields are not constraints, so
/// the default value matches every segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternCriteria {
    /// Gates the segment must all carry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gates: Option<Vec<u8>>,

    /// Centers the segment must all carry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub centers: Option<Vec<String>>,

    /// A structure tag at least one sentence must carry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure: Option<SentenceStructure>,
}

impl PatternCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gates(mut self, gates: impl IntoIterator<Item = u8>) -> Self {
        self.gates = Some(gates.into_iter().collect());
        self
    }

    pub fn with_centers<S: Into<String>>(mut self, centers: impl IntoIterator<Item = S>) -> Self {
        self.centers = Some(centers.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_structure(mut self, structure: SentenceStructure) -> Self {
        self.structure = Some(structure);
        self
    }

    fn matches(&self, segment: &Segment) -> bool {
        if let Some(gates) = &self.gates {
            if !gates.iter().all(|gate| segment.entities.gates.contains(gate)) {
                return false;
            }
        }
        if let Some(centers) = &self.centers {
            if !centers
                .iter()
                .all(|center| segment.entities.centers.contains(center))
            {
                return false;
            }
        }
        if let Some(structure) = self.structure {
            if !segment.has_structure(structure) {
                return false;
            }
        }
        true
    }
}

/// Stateless full-scan matcher reading a library's segments.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternMatcher;

impl PatternMatcher {
    /// Every segment satisfying all supplied criteria, with its document
    /// summary and context window attached.
    pub fn find_pattern<'a>(
        &self,
        criteria: &PatternCriteria,
        library: &'a Library,
    ) -> Vec<SegmentView<'a>> {
        library
            .segments()
            .filter(|segment| criteria.matches(segment))
            .filter_map(|segment| library.segment_with_context(&segment.id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::document::DocumentSource;

    fn library() -> Library {
        let mut library = Library::new();
        library
            .ingest(DocumentSource::new(
                "b1",
                "Gates",
                "A. Reader",
                "Gate 25 and gate 51 cross the g center, the heart, and the spleen.",
            ))
            .unwrap();
        library
            .ingest(DocumentSource::new(
                "b2",
                "Choices",
                "A. Reader",
                "Either the sacral responds or the mind interferes with it.",
            ))
            .unwrap();
        library
    }

    #[test]
    fn empty_criteria_match_every_segment() {
        let library = library();
        let matches = library.find_pattern(&PatternCriteria::new());
        assert_eq!(matches.len(), 2);
        // Stable scan order: ingestion order, then tiling order.
        assert_eq!(matches[0].segment.id, "b1-seg-0");
        assert_eq!(matches[1].segment.id, "b2-seg-0");
    }

    #[test]
    fn all_supplied_criteria_must_hold() {
        let library = library();

        let criteria = PatternCriteria::new()
            .with_gates([25, 51])
            .with_centers(["g", "heart"])
            .with_structure(SentenceStructure::Nested);
        let matches = library.find_pattern(&criteria);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].document.id, "b1");

        // One missing gate fails the whole conjunction.
        let criteria = PatternCriteria::new().with_gates([25, 51, 60]);
        assert!(library.find_pattern(&criteria).is_empty());
    }

    #[test]
    fn structure_criterion_needs_only_one_sentence() {
        let library = library();
        let matches =
            library.find_pattern(&PatternCriteria::new().with_structure(SentenceStructure::BinarySplit));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].segment.id, "b2-seg-0");
    }

    #[test]
    fn unmatched_center_returns_empty() {
        let library = library();
        let matches = library.find_pattern(&PatternCriteria::new().with_centers(["ajna"]));
        assert!(matches.is_empty());
    }

    #[test]
    fn empty_requested_sets_are_vacuously_true() {
        let library = library();
        let criteria = PatternCriteria::new()
            .with_gates([])
            .with_centers(Vec::<String>::new());
        assert_eq!(library.find_pattern(&criteria).len(), 2);
    }
}

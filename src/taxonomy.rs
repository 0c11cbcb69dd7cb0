//! Static reference taxonomy of recognized entities.
//!
//! The taxonomy enumerates what the classifier knows how to tag: the valid
//! gate number range, the center and planet lexicons, the element lexicon,
//! and the free concept list. The engine treats it as a read-only lookup
//! table; swapping in a custom taxonomy changes what gets tagged without
//! touching the classification rules themselves.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// A lexicon entry: the phrase searched for and the canonical value
/// recorded when it is found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    /// Phrase looked up in lowercased segment text.
    pub phrase: String,

    /// Canonical value stored in the tag set and index.
    pub value: String,
}

impl LexiconEntry {
    /// Create an entry whose canonical value differs from its phrase.
    pub fn new(phrase: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
            value: value.into(),
        }
    }

    /// Create an entry recorded under the phrase itself.
    pub fn plain(phrase: impl Into<String>) -> Self {
        let phrase = phrase.into();
        Self {
            value: phrase.clone(),
            phrase,
        }
    }
}

/// The closed set of entity categories the classifier recognizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    /// Valid gate numbers; references outside the range are dropped.
    pub gate_range: RangeInclusive<u8>,

    /// Center lexicon, matched by substring containment.
    pub centers: Vec<LexiconEntry>,

    /// Planet lexicon, matched by substring containment.
    pub planets: Vec<LexiconEntry>,

    /// Element names, matched as whole words only. An element already
    /// captured as a planet is not tagged again (`earth` sits in both
    /// lexicons).
    pub elements: Vec<String>,

    /// Free concept list, matched by substring containment.
    pub concepts: Vec<String>,
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self {
            gate_range: 1..=64,
            centers: vec![
                LexiconEntry::plain("head"),
                LexiconEntry::plain("ajna"),
                LexiconEntry::plain("throat"),
                LexiconEntry::new("g center", "g"),
                LexiconEntry::plain("heart"),
                LexiconEntry::plain("sacral"),
                LexiconEntry::plain("spleen"),
                LexiconEntry::new("solar plexus", "solar"),
                LexiconEntry::plain("root"),
            ],
            planets: vec![
                LexiconEntry::plain("sun"),
                LexiconEntry::plain("earth"),
                LexiconEntry::plain("moon"),
                LexiconEntry::plain("mercury"),
                LexiconEntry::plain("venus"),
                LexiconEntry::plain("mars"),
                LexiconEntry::plain("jupiter"),
                LexiconEntry::plain("saturn"),
                LexiconEntry::plain("uranus"),
                LexiconEntry::plain("neptune"),
                LexiconEntry::plain("pluto"),
                LexiconEntry::new("north node", "north_node"),
                LexiconEntry::new("south node", "south_node"),
            ],
            elements: ["earth", "water", "fire", "air", "aether"]
                .map(String::from)
                .to_vec(),
            concepts: [
                "consciousness",
                "resonance",
                "design",
                "personality",
                "bodygraph",
                "strategy",
                "authority",
                "profile",
                "channel",
                "circuit",
                "manifestor",
                "generator",
                "projector",
                "reflector",
                "defined",
                "undefined",
                "open",
                "activation",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_gate_range_is_closed() {
        let taxonomy = Taxonomy::default();
        assert!(taxonomy.gate_range.contains(&1));
        assert!(taxonomy.gate_range.contains(&64));
        assert!(!taxonomy.gate_range.contains(&65));
        assert!(!taxonomy.gate_range.contains(&0));
    }

    #[test]
    fn multi_word_phrases_collapse_to_canonical_values() {
        let taxonomy = Taxonomy::default();
        let g = taxonomy
            .centers
            .iter()
            .find(|entry| entry.phrase == "g center")
            .unwrap();
        assert_eq!(g.value, "g");

        let node = taxonomy
            .planets
            .iter()
            .find(|entry| entry.phrase == "north node")
            .unwrap();
        assert_eq!(node.value, "north_node");
    }

    #[test]
    fn earth_is_both_planet_and_element() {
        let taxonomy = Taxonomy::default();
        assert!(taxonomy.planets.iter().any(|entry| entry.value == "earth"));
        assert!(taxonomy.elements.iter().any(|name| name == "earth"));
    }
}

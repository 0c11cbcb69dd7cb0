//! Entity tagging and sentence structure analysis.
//!
//! Classification is a pure function of the input text plus the taxonomy:
//! no I/O, no state, identical input always produces identical output. The
//! same classifier instance serves ingestion and query parsing so both
//! sides agree on what counts as an entity.
//!
//! Categories are applied in a fixed precedence order: gate phrases,
//! centers, planets, elements, concepts, then free numbers. Elements skip
//! any name already captured as a planet; free numbers are collected
//! independently of gate-range validation.

use regex_lite::Regex;

use crate::segment::{EntityTags, Sentence, SentenceStructure};
use crate::taxonomy::Taxonomy;

/// Minimum trimmed length a sentence fragment must exceed to be kept.
const MIN_SENTENCE_CHARS: usize = 10;

/// Tags entities and classifies sentence structure against a taxonomy.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    taxonomy: Taxonomy,
}

impl Classifier {
    /// Create a classifier over the default taxonomy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier over a custom taxonomy.
    pub fn with_taxonomy(taxonomy: Taxonomy) -> Self {
        Self { taxonomy }
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Classify a segment's text into entity tags and sentences.
    pub fn classify(&self, text: &str) -> (EntityTags, Vec<Sentence>) {
        (self.extract_entities(text), self.extract_sentences(text))
    }

    /// Extract the per-category deduplicated entity sets from `text`.
    pub fn extract_entities(&self, text: &str) -> EntityTags {
        let mut tags = EntityTags::default();
        let lower = text.to_lowercase();

        // Explicit gate references ("Gate 25", "gate 64"), range-checked.
        if let Ok(re) = Regex::new(r"(?i)gate\s+(\d{1,2})") {
            for caps in re.captures_iter(text) {
                if let Some(number) = caps.get(1) {
                    if let Ok(gate) = number.as_str().parse::<u8>() {
                        if self.taxonomy.gate_range.contains(&gate) && !tags.gates.contains(&gate) {
                            tags.gates.push(gate);
                        }
                    }
                }
            }
        }

        for entry in &self.taxonomy.centers {
            if lower.contains(entry.phrase.as_str()) {
                tags.centers.push(entry.value.clone());
            }
        }

        for entry in &self.taxonomy.planets {
            if lower.contains(entry.phrase.as_str()) {
                tags.planets.push(entry.value.clone());
            }
        }

        // Elements match whole words only, and never shadow a planet hit.
        for element in &self.taxonomy.elements {
            if tags.planets.iter().any(|planet| planet == element) {
                continue;
            }
            let pattern = format!(r"(?i)\b{}\b", regex_lite::escape(element));
            if let Ok(re) = Regex::new(&pattern) {
                if re.is_match(text) {
                    tags.elements.push(element.clone());
                }
            }
        }

        for concept in &self.taxonomy.concepts {
            if lower.contains(concept.as_str()) {
                tags.concepts.push(concept.clone());
            }
        }

        // Standalone one- and two-digit numbers, whatever they refer to.
        if let Ok(re) = Regex::new(r"\b\d{1,2}\b") {
            for hit in re.find_iter(text) {
                if let Ok(number) = hit.as_str().parse::<u8>() {
                    if !tags.numbers.contains(&number) {
                        tags.numbers.push(number);
                    }
                }
            }
        }

        tags
    }

    /// Split `text` into sentences and classify each one's structure.
    ///
    /// Splits on runs of terminal punctuation followed by whitespace;
    /// fragments at or under `MIN_SENTENCE_CHARS` trimmed characters are
    /// dropped, and ordinals number the survivors.
    pub fn extract_sentences(&self, text: &str) -> Vec<Sentence> {
        let mut fragments = Vec::new();
        if let Ok(re) = Regex::new(r"[.!?]+\s+") {
            let mut last = 0;
            for boundary in re.find_iter(text) {
                fragments.push(&text[last..boundary.start()]);
                last = boundary.end();
            }
            fragments.push(&text[last..]);
        } else {
            fragments.push(text);
        }

        fragments
            .into_iter()
            .map(str::trim)
            .filter(|fragment| fragment.len() > MIN_SENTENCE_CHARS)
            .enumerate()
            .map(|(index, fragment)| Sentence {
                index,
                text: fragment.to_string(),
                word_count: fragment.split_whitespace().count(),
                structure: Self::sentence_structure(fragment),
            })
            .collect()
    }

    /// First-matching structural rule: disjunction, nesting, symmetry,
    /// else linear.
    fn sentence_structure(sentence: &str) -> SentenceStructure {
        if let Ok(re) = Regex::new(r"(?i)\b(or|either|neither|versus|vs)\b") {
            if re.is_match(sentence) {
                return SentenceStructure::BinarySplit;
            }
        }

        if sentence.matches(',').count() >= 2 {
            return SentenceStructure::Nested;
        }

        let words: Vec<&str> = sentence.split_whitespace().collect();
        let first_half = &words[..words.len() / 2];
        let second_half = &words[words.len().div_ceil(2)..];
        let mirrored = first_half
            .iter()
            .zip(second_half.iter().rev())
            .any(|(a, b)| a == b);

        if mirrored {
            SentenceStructure::Mirror
        } else {
            SentenceStructure::SimpleLinear
        }
    }
}

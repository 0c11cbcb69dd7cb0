//! Ranked search over the library.
//!
//! Search runs in three phases: structured lookup of gate and center
//! references through the inverted index, a lexical full scan scoring
//! query tokens as substrings, and a merge that deduplicates by segment
//! and sorts by score. Planet, element, concept, and number tags are
//! deliberately left out of the structured phase; they reach results only
//! through the lexical scan.

use std::collections::HashSet;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::index::EntityKind;
use crate::library::Library;

/// Why a segment matched the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Query referenced a gate indexed for this segment.
    Gate,
    /// Query referenced a center indexed for this segment.
    Center,
    /// Query tokens appear literally in the segment text.
    Fulltext,
}

/// One ranked hit. Transient: produced per query, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub segment_id: String,

    /// `1.0` for gate matches, `0.9` for center matches, `0.1` per
    /// matching query token for fulltext.
    pub score: f32,

    pub match_kind: MatchKind,

    /// The gate number or center name that matched, or the whole query
    /// string for fulltext hits.
    pub match_value: String,
}

/// Stateless ranked-search engine reading a library's collections.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetrievalEngine;

impl RetrievalEngine {
    /// Answer a free-text query with ranked, deduplicated results.
    ///
    /// Total over any input: an empty or unmatched query returns an empty
    /// vec. A segment that matches both a structured phase and the
    /// lexical scan keeps the structured result, even when the lexical
    /// score is numerically higher.
    pub fn search(&self, query: &str, library: &Library) -> Vec<SearchResult> {
        let started = Instant::now();
        let query_tags = library.classifier().extract_entities(query);

        let mut results = Vec::new();

        // Phase 1: gate and center references resolve through the index.
        // Entries whose segment no longer exists are skipped.
        for gate in &query_tags.gates {
            let value = gate.to_string();
            for segment_id in library.index().lookup(EntityKind::Gate, &value) {
                if library.segment(segment_id).is_some() {
                    results.push(SearchResult {
                        segment_id: segment_id.clone(),
                        score: 1.0,
                        match_kind: MatchKind::Gate,
                        match_value: value.clone(),
                    });
                }
            }
        }
        for center in &query_tags.centers {
            for segment_id in library.index().lookup(EntityKind::Center, center) {
                if library.segment(segment_id).is_some() {
                    results.push(SearchResult {
                        segment_id: segment_id.clone(),
                        score: 0.9,
                        match_kind: MatchKind::Center,
                        match_value: center.clone(),
                    });
                }
            }
        }

        // Phase 2: lexical scan of every segment. Tokens count with
        // repetition, so "fire fire" scores double.
        let lowered = query.to_lowercase();
        let tokens: Vec<&str> = lowered.split_whitespace().collect();
        if !tokens.is_empty() {
            for segment in library.segments() {
                let text = segment.text.to_lowercase();
                let hits = tokens.iter().filter(|token| text.contains(*token)).count();
                if hits > 0 {
                    results.push(SearchResult {
                        segment_id: segment.id.clone(),
                        score: hits as f32 * 0.1,
                        match_kind: MatchKind::Fulltext,
                        match_value: query.to_string(),
                    });
                }
            }
        }

        // Phase 3: first occurrence per segment wins, then stable sort by
        // descending score.
        let mut seen = HashSet::new();
        let mut unique: Vec<SearchResult> = results
            .into_iter()
            .filter(|result| seen.insert(result.segment_id.clone()))
            .collect();
        unique.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        debug!(
            "Search returned {} results in {}ms",
            unique.len(),
            started.elapsed().as_millis()
        );
        unique
    }

    /// Resolve a hit's segment id back to the segment, its document
    /// summary, and its context window for display.
    pub fn segment_with_context<'a>(
        &self,
        segment_id: &str,
        library: &'a Library,
    ) -> Option<crate::library::SegmentView<'a>> {
        library.segment_with_context(segment_id)
    }
}

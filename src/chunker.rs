//! Sliding-window document tiling.
//!
//! The chunker splits a document's whitespace tokens into fixed-size
//! windows that overlap by a configured amount, so that entity mentions
//! near a window edge are still seen whole by at least one segment. Each
//! segment also carries a context window: the words immediately outside
//! its span, kept for display alongside retrieval hits.

use tracing::debug;

use crate::error::{LibraryError, Result};
use crate::segment::{ContextWindow, EntityTags, Segment};

/// Tiling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkerConfig {
    /// Words per segment. The final segment of a document may be shorter.
    pub window_size: usize,

    /// Words shared between consecutive segments. Must be smaller than
    /// `window_size` and non-zero.
    pub overlap: usize,

    /// Maximum words captured on each side of a segment's span.
    pub context_words: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            window_size: 500,
            overlap: 100,
            context_words: 50,
        }
    }
}

impl ChunkerConfig {
    fn validate(&self) -> Result<()> {
        if self.window_size == 0 || self.overlap == 0 || self.overlap >= self.window_size {
            return Err(LibraryError::InvalidChunkConfig {
                window_size: self.window_size,
                overlap: self.overlap,
            });
        }
        Ok(())
    }
}

/// Splits document text into overlapping windowed segments.
///
/// Segment `i` starts at word offset `i * (window_size - overlap)`; the
/// spans cover every word of the document and the last span ends exactly
/// at the document's word count. Entity tags and sentences are left empty
/// here and filled in by the classifier during ingestion.
#[derive(Debug, Clone, Default)]
pub struct Chunker {
    config: ChunkerConfig,
}

impl Chunker {
    /// Create a chunker with the default window geometry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a chunker with custom geometry.
    pub fn with_config(config: ChunkerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    /// Tile `text` into segments owned by `document_id`.
    ///
    /// Fails with `InvalidChunkConfig` before producing any segment when
    /// the geometry cannot terminate. Empty text yields no segments.
    pub fn chunk(&self, text: &str, document_id: &str) -> Result<Vec<Segment>> {
        self.config.validate()?;

        let words: Vec<&str> = text.split_whitespace().collect();
        let stride = self.config.window_size - self.config.overlap;
        let context = self.config.context_words;

        let mut segments = Vec::new();
        let mut start = 0;
        while start < words.len() {
            let end = (start + self.config.window_size).min(words.len());

            let before = (start > 0).then(|| words[start.saturating_sub(context)..start].join(" "));
            let after =
                (end < words.len()).then(|| words[end..(end + context).min(words.len())].join(" "));

            segments.push(Segment {
                id: format!("{document_id}-seg-{}", segments.len()),
                document_id: document_id.to_string(),
                start,
                end,
                text: words[start..end].join(" "),
                word_count: end - start,
                context: ContextWindow { before, after },
                entities: EntityTags::default(),
                sentences: Vec::new(),
            });

            start += stride;
        }

        debug!(
            "Chunked document {document_id}: {} words into {} segments",
            words.len(),
            segments.len()
        );
        Ok(segments)
    }
}

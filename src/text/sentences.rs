//! Heuristic sentence segmentation for documentation comments.
//!
//! A sentence ends at a delimiter (`.` or `;` by default) followed by a space.
//! Abbreviations such as "e.g. foo" are split too; that is accepted.

use crate::core::config::SegmentationConfig;

/// Splits comment text into candidate sentences.
#[derive(Debug, Clone, Default)]
pub struct SentenceSplitter {
    config: SegmentationConfig,
}

impl SentenceSplitter {
    pub fn new(config: SegmentationConfig) -> Self {
        Self { config }
    }

    /// Split `text`, dropping fragments shorter than the configured minimum.
    ///
    /// Whitespace runs (including line breaks from wrapped comments) are
    /// collapsed to single spaces first.
    pub fn split(&self, text: &str) -> Vec<String> {
        let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut chars = normalized.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            if !self.config.delimiters.contains(&c) {
                continue;
            }
            if let Some(&(space, ' ')) = chars.peek() {
                self.push_sentence(&mut sentences, &normalized[start..i]);
                chars.next();
                start = space + 1;
            }
        }
        self.push_sentence(&mut sentences, &normalized[start..]);
        sentences
    }

    fn push_sentence(&self, sentences: &mut Vec<String>, fragment: &str) {
        let trimmed = fragment.trim();
        if trimmed.chars().count() >= self.config.min_sentence_length {
            sentences.push(trimmed.to_string());
        }
    }
}

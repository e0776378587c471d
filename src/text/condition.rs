//! Guard clause extraction ("if ..." / "when ..." up to a delimiter).

use regex::Regex;

use crate::core::config::ConditionConfig;
use crate::core::errors::Result;

/// Strategy that extracts a guard clause from a sentence.
pub trait ConditionExtractor: Send + Sync {
    /// The guard clause text, or `None` when the sentence has none
    fn extract(&self, sentence: &str) -> Option<String>;
}

/// Marker-to-delimiter extractor.
///
/// The clause starts at the first whole-word occurrence of the first marker
/// present (`if`, then `when`) and ends at the next terminator. A clause with
/// no terminator after it runs to the end of the sentence only when it is set
/// off by a terminator before the marker (`..., if the list is empty`) or
/// when `allow_sentence_end` is enabled.
#[derive(Debug)]
pub struct DelimitedConditionExtractor {
    markers: Vec<Regex>,
    terminators: Vec<char>,
    allow_sentence_end: bool,
}

impl DelimitedConditionExtractor {
    pub fn new(config: &ConditionConfig) -> Result<Self> {
        let markers = config
            .markers
            .iter()
            .map(|m| Regex::new(&format!(r"(?i)\b{}\b", regex::escape(m.trim()))))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self {
            markers,
            terminators: config.terminators.clone(),
            allow_sentence_end: config.allow_sentence_end,
        })
    }

    fn marker_start(&self, sentence: &str) -> Option<usize> {
        self.markers
            .iter()
            .find_map(|re| re.find(sentence).map(|m| m.start()))
    }
}

impl ConditionExtractor for DelimitedConditionExtractor {
    fn extract(&self, sentence: &str) -> Option<String> {
        let begin = self.marker_start(sentence)?;
        let terminators = self.terminators.as_slice();

        if let Some(offset) = sentence[begin..].find(terminators) {
            return Some(sentence[begin..begin + offset].to_string());
        }
        let trailing = sentence[..begin].contains(terminators);
        if trailing || self.allow_sentence_end {
            let clause = sentence[begin..].trim_end_matches(['.', ';', ' ']);
            return Some(clause.to_string());
        }
        None
    }
}

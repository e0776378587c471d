//! Detection of equivalence and similarity statements in single sentences.

use regex::Regex;

use crate::core::config::DetectionConfig;
use crate::core::errors::Result;
use crate::model::equivalence::EquivalenceMatch;
use crate::text::references::find_reference;

/// Strategy that recognizes an equivalence declaration in a sentence.
pub trait EquivalenceDetector: Send + Sync {
    /// Analyze `sentence`. A record without a reference means nothing was found.
    fn detect(&self, sentence: &str) -> EquivalenceMatch;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PhraseKind {
    Equivalence,
    Similarity,
}

#[derive(Debug, Clone, Copy)]
struct PhraseMatch {
    start: usize,
    end: usize,
    kind: PhraseKind,
}

#[derive(Debug)]
struct Phrase {
    pattern: Regex,
    kind: PhraseKind,
}

/// Phrase-table detector.
///
/// The first call expression after the earliest equivalence or similarity
/// phrase is the referenced member, and the phrase nearest before that call
/// is the one that declares it. A negation word within a few words before
/// that phrase, in the same comma-delimited clause, negates it. A
/// conditional marker anywhere in the sentence turns an exact equivalence
/// into a conditional one.
#[derive(Debug)]
pub struct PhraseEquivalenceDetector {
    phrases: Vec<Phrase>,
    negation_words: Vec<String>,
    negation_window: usize,
    conditional: Option<Regex>,
}

impl PhraseEquivalenceDetector {
    pub fn new(config: &DetectionConfig) -> Result<Self> {
        let mut phrases = Vec::new();
        for phrase in &config.equivalence_phrases {
            phrases.push(Phrase {
                pattern: phrase_pattern(phrase)?,
                kind: PhraseKind::Equivalence,
            });
        }
        for phrase in &config.similarity_phrases {
            phrases.push(Phrase {
                pattern: phrase_pattern(phrase)?,
                kind: PhraseKind::Similarity,
            });
        }

        let conditional = if config.conditional_markers.is_empty() {
            None
        } else {
            let alternatives = config
                .conditional_markers
                .iter()
                .map(|m| regex::escape(m.trim()))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&format!(r"(?i)\b(?:{alternatives})\b"))?)
        };

        Ok(Self {
            phrases,
            negation_words: config
                .negation_words
                .iter()
                .map(|w| w.to_lowercase())
                .collect(),
            negation_window: config.negation_window,
            conditional,
        })
    }

    fn phrase_matches<'s>(&'s self, sentence: &'s str) -> impl Iterator<Item = PhraseMatch> + 's {
        self.phrases.iter().flat_map(move |phrase| {
            phrase.pattern.find_iter(sentence).map(move |m| PhraseMatch {
                start: m.start(),
                end: m.end(),
                kind: phrase.kind,
            })
        })
    }

    /// Earliest phrase, the longest one on a tie
    fn earliest_phrase(&self, sentence: &str) -> Option<PhraseMatch> {
        self.phrase_matches(sentence)
            .min_by_key(|m| (m.start, std::cmp::Reverse(m.end - m.start)))
    }

    /// Phrase ending closest before `limit`, the longest one on a tie
    fn nearest_phrase_before(&self, sentence: &str, limit: usize) -> Option<PhraseMatch> {
        self.phrase_matches(sentence)
            .filter(|m| m.end <= limit)
            .max_by_key(|m| (m.end, m.end - m.start))
    }

    fn is_negated(&self, before: &str) -> bool {
        let words: Vec<&str> = before.split_whitespace().collect();
        let window_start = words.len().saturating_sub(self.negation_window);
        words[window_start..].iter().any(|word| {
            let word = word
                .trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                .to_lowercase();
            self.negation_words.contains(&word)
        })
    }
}

impl EquivalenceDetector for PhraseEquivalenceDetector {
    fn detect(&self, sentence: &str) -> EquivalenceMatch {
        let Some(first) = self.earliest_phrase(sentence) else {
            return EquivalenceMatch::none(sentence);
        };
        let Some(located) = find_reference(sentence, first.end) else {
            return EquivalenceMatch::none(sentence);
        };
        // A guard clause may hold its own phrase ("if x is not equal to 0, same
        // as f()"); the phrase nearest the reference is the one that names it.
        let phrase = self
            .nearest_phrase_before(sentence, located.start)
            .unwrap_or(first);

        let negated = self.is_negated(clause_before(sentence, phrase.start));
        let conditional = self
            .conditional
            .as_ref()
            .is_some_and(|re| re.is_match(sentence));
        let similarity = phrase.kind == PhraseKind::Similarity || conditional;

        EquivalenceMatch::detected(sentence, located.reference, similarity, negated)
    }
}

/// Text between the last clause break (`,` or `;`) before `end` and `end`.
fn clause_before(sentence: &str, end: usize) -> &str {
    let before = &sentence[..end];
    match before.rfind([',', ';']) {
        Some(i) => &before[i + 1..],
        None => before,
    }
}

fn phrase_pattern(phrase: &str) -> Result<Regex> {
    let body = phrase
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    Ok(Regex::new(&format!(r"(?i)\b{body}\b"))?)
}

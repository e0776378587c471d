//! Filtering candidates down to those whose name matches the referenced member.

use crate::core::config::{MatchRule, MatchingConfig};
use crate::model::code_element::CodeElement;

/// Name matcher applying configured rules in order.
///
/// The first rule that matches any candidate decides: every candidate it
/// matches is returned, in candidate order. Ambiguity is left to overload
/// resolution instead of being collapsed here.
#[derive(Debug, Clone, Default)]
pub struct SubjectMatcher {
    config: MatchingConfig,
}

impl SubjectMatcher {
    pub fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    pub fn subject_match<'a>(&self, name: &str, candidates: &'a [CodeElement]) -> Vec<&'a CodeElement> {
        if name.is_empty() {
            return Vec::new();
        }
        for rule in &self.config.rules {
            let matched: Vec<&CodeElement> = candidates
                .iter()
                .filter(|c| self.names_match(*rule, name, c.name()))
                .collect();
            if !matched.is_empty() {
                return matched;
            }
        }
        Vec::new()
    }

    fn names_match(&self, rule: MatchRule, referenced: &str, candidate: &str) -> bool {
        match rule {
            MatchRule::Exact => referenced == candidate,
            MatchRule::CaseInsensitive => referenced.eq_ignore_ascii_case(candidate),
            MatchRule::Normalized => {
                let a = self.normalize(referenced);
                !a.is_empty() && a == self.normalize(candidate)
            }
        }
    }

    /// Lowercased name without an accessor prefix or a trailing third-person `s`
    /// (`getSize` -> `size`, `contains` -> `contain`).
    pub fn normalize(&self, name: &str) -> String {
        let mut stem = name;
        for prefix in &self.config.verb_prefixes {
            if let Some(rest) = strip_prefix_camel(stem, prefix) {
                stem = rest;
                break;
            }
        }
        let lower = stem.to_ascii_lowercase();
        match lower.strip_suffix('s') {
            Some(root) if root.len() >= 3 && !root.ends_with('s') => root.to_string(),
            _ => lower,
        }
    }
}

// Prefix must be followed by an uppercase letter or underscore: `isEmpty`, `get_size`, not `issue`.
fn strip_prefix_camel<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = name.strip_prefix(prefix)?;
    let next = rest.chars().next()?;
    if next.is_uppercase() {
        Some(rest)
    } else if next == '_' {
        Some(&rest[1..])
    } else {
        None
    }
}

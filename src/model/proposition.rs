//! Translated guard clauses.

use serde::{Deserialize, Serialize};

/// Connective joining two adjacent propositions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Conjunction {
    And,
    Or,
}

impl Conjunction {
    pub fn operator(self) -> &'static str {
        match self {
            Self::And => "&&",
            Self::Or => "||",
        }
    }
}

/// One logical sub-clause of a guard, e.g. "the list is empty".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposition {
    /// Subject phrase as written
    pub subject: String,
    /// Predicate phrase as written
    pub predicate: String,
    /// Boolean expression for this proposition, when one could be produced
    pub translation: Option<String>,
}

/// Ordered propositions of one guard clause plus their joint translation.
///
/// The pipeline reads only [`PropositionSeries::translation`]; an empty
/// translation means no usable predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropositionSeries {
    propositions: Vec<Proposition>,
    conjunctions: Vec<Conjunction>,
    translation: String,
}

impl PropositionSeries {
    pub fn new(propositions: Vec<Proposition>, conjunctions: Vec<Conjunction>) -> Self {
        let translation = Self::join(&propositions, &conjunctions);
        Self {
            propositions,
            conjunctions,
            translation,
        }
    }

    /// Series carrying a ready-made translation, for translators without a proposition model
    pub fn from_translation(translation: impl Into<String>) -> Self {
        Self {
            propositions: Vec::new(),
            conjunctions: Vec::new(),
            translation: translation.into(),
        }
    }

    pub fn propositions(&self) -> &[Proposition] {
        &self.propositions
    }

    pub fn conjunctions(&self) -> &[Conjunction] {
        &self.conjunctions
    }

    pub fn translation(&self) -> &str {
        &self.translation
    }

    // Empty as soon as one proposition is untranslated.
    fn join(propositions: &[Proposition], conjunctions: &[Conjunction]) -> String {
        let mut out = String::new();
        for (i, proposition) in propositions.iter().enumerate() {
            let Some(text) = proposition.translation.as_deref().filter(|t| !t.is_empty()) else {
                return String::new();
            };
            if i > 0 {
                let op = conjunctions.get(i - 1).copied().unwrap_or(Conjunction::And);
                out.push(' ');
                out.push_str(op.operator());
                out.push(' ');
            }
            out.push_str(text);
        }
        out
    }
}

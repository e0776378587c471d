//! Per-sentence equivalence records.

use serde::{Deserialize, Serialize};

/// A member reference found in documentation text, e.g. `list.indexOf(o)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodReference {
    /// The reference exactly as written, e.g. `list.indexOf(o)`
    pub signature: String,
    /// Qualifier before the simple name (`list` in `list.indexOf(o)`), if any
    pub qualifier: Option<String>,
    /// Simple member name, e.g. `indexOf`
    pub simple_name: String,
    /// Argument expressions as written, split at top-level commas
    pub arguments: Vec<String>,
}

impl MethodReference {
    pub fn new(simple_name: impl Into<String>, arguments: Vec<String>) -> Self {
        let simple_name = simple_name.into();
        Self {
            signature: format!("{}({})", simple_name, arguments.join(", ")),
            qualifier: None,
            simple_name,
            arguments,
        }
    }
}

/// Why a detected (or undetected) equivalence carries no oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum UnresolvedReason {
    /// The sentence declares no equivalence
    NoEquivalence,
    /// Conditional equivalence without an extractable guard clause
    NoGuard,
    /// Every guard translation came back empty
    EmptyGuardTranslation,
    /// No candidate's name matches the referenced member
    NoSubjectMatch,
    /// Name matches exist but none is argument-compatible
    NoCompatibleOverload,
    /// The synthesized expression failed the structural type check
    StructurallyInvalid(String),
    /// The oracle validator rejected the synthesized expression
    ValidationRejected,
}

/// Outcome of analyzing one sentence.
///
/// Built fresh per sentence and never mutated in place: each resolution stage
/// returns a new record. `oracle` is set only when matching, overload
/// resolution and validation all succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquivalenceMatch {
    sentence: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reference: Option<MethodReference>,
    similarity: bool,
    negated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    oracle: Option<String>,
    /// Every oracle that passed validation, in synthesis order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    candidate_oracles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    unresolved: Option<UnresolvedReason>,
}

impl EquivalenceMatch {
    /// Record for a sentence that declares no equivalence
    pub fn none(sentence: impl Into<String>) -> Self {
        Self {
            sentence: sentence.into(),
            reference: None,
            similarity: false,
            negated: false,
            oracle: None,
            candidate_oracles: Vec::new(),
            unresolved: Some(UnresolvedReason::NoEquivalence),
        }
    }

    /// Record for a detected equivalence that has not been resolved yet
    pub fn detected(
        sentence: impl Into<String>,
        reference: MethodReference,
        similarity: bool,
        negated: bool,
    ) -> Self {
        Self {
            sentence: sentence.into(),
            reference: Some(reference),
            similarity,
            negated,
            oracle: None,
            candidate_oracles: Vec::new(),
            unresolved: None,
        }
    }

    /// A copy carrying the given oracles; `selected` becomes the oracle slot
    pub fn resolved(self, candidate_oracles: Vec<String>, selected: String) -> Self {
        Self {
            oracle: Some(selected),
            candidate_oracles,
            unresolved: None,
            ..self
        }
    }

    /// A copy marked unresolved for `reason`, with no oracle
    pub fn unresolved(self, reason: UnresolvedReason) -> Self {
        Self {
            oracle: None,
            candidate_oracles: Vec::new(),
            unresolved: Some(reason),
            ..self
        }
    }

    pub fn sentence(&self) -> &str {
        &self.sentence
    }

    pub fn reference(&self) -> Option<&MethodReference> {
        self.reference.as_ref()
    }

    /// Referenced member's simple name; empty when no equivalence was found
    pub fn simple_name(&self) -> &str {
        self.reference.as_ref().map_or("", |r| r.simple_name.as_str())
    }

    /// Referenced member as written; empty when no equivalence was found
    pub fn method_signature(&self) -> &str {
        self.reference.as_ref().map_or("", |r| r.signature.as_str())
    }

    pub fn is_similarity(&self) -> bool {
        self.similarity
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    pub fn oracle(&self) -> Option<&str> {
        self.oracle.as_deref()
    }

    pub fn candidate_oracles(&self) -> &[String] {
        &self.candidate_oracles
    }

    pub fn unresolved_reason(&self) -> Option<&UnresolvedReason> {
        self.unresolved.as_ref()
    }

    /// An equivalence was detected in the sentence
    pub fn is_detected(&self) -> bool {
        self.reference.is_some()
    }

    pub fn is_resolved(&self) -> bool {
        self.oracle.is_some()
    }
}

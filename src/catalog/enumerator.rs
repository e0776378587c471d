//! Candidate enumeration boundary.

use indexmap::IndexSet;

use crate::core::errors::Result;
use crate::matching::types::{FlatHierarchy, TypeHierarchy};
use crate::model::code_element::CodeElement;
use crate::model::member::DocumentedMember;

/// Source of the code elements visible from a documented member's declaring type.
///
/// Implementations must return a deterministic, duplicate-free list in
/// declaration order (declaring type first, then supertypes). Errors are
/// treated as a hard failure for this member only.
pub trait CandidateEnumerator: Send + Sync {
    /// Candidates for `member`
    fn enumerate(&self, member: &DocumentedMember) -> Result<Vec<CodeElement>>;

    /// Subtyping knowledge used to score reference arguments
    fn hierarchy(&self) -> &dyn TypeHierarchy {
        &FlatHierarchy
    }
}

/// Fixed candidate list, mostly useful for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct StaticEnumerator {
    candidates: Vec<CodeElement>,
}

impl StaticEnumerator {
    pub fn new(candidates: Vec<CodeElement>) -> Self {
        Self { candidates }
    }
}

impl CandidateEnumerator for StaticEnumerator {
    fn enumerate(&self, _member: &DocumentedMember) -> Result<Vec<CodeElement>> {
        let unique: IndexSet<&CodeElement> = self.candidates.iter().collect();
        Ok(unique.into_iter().cloned().collect())
    }
}

//! Guard translation boundary.

use crate::core::errors::Result;
use crate::model::member::DocumentedMember;
use crate::model::proposition::PropositionSeries;

/// Turns an extracted guard clause into boolean predicates.
///
/// Each returned series exposes a `translation`; an empty translation means
/// the series has no usable predicate. An `Err` is a hard failure for the
/// member being analyzed.
pub trait GuardTranslator: Send + Sync {
    fn translate(&self, clause: &str, member: &DocumentedMember) -> Result<Vec<PropositionSeries>>;
}

impl<F> GuardTranslator for F
where
    F: Fn(&str, &DocumentedMember) -> Result<Vec<PropositionSeries>> + Send + Sync,
{
    fn translate(&self, clause: &str, member: &DocumentedMember) -> Result<Vec<PropositionSeries>> {
        self(clause, member)
    }
}

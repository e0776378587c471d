//! Overload resolution: picking one candidate by argument compatibility.
//!
//! Every name-matched candidate is scored by the summed distance of its
//! bound arguments. The lowest score wins; equal scores keep the candidate
//! that comes first in declaration order. Arity mismatches and arguments over
//! the distance ceiling disqualify a candidate.

use tracing::trace;

use crate::core::config::{ResolutionConfig, SynthesisConfig};
use crate::matching::arguments::{bind_argument, member_parameters, BoundArgument};
use crate::matching::types::{argument_distance, TypeHierarchy};
use crate::model::code_element::{CodeElement, ElementKind};
use crate::model::equivalence::MethodReference;
use crate::model::member::DocumentedMember;

/// The resolved candidate and how to invoke it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    element: CodeElement,
    arguments: Vec<BoundArgument>,
    receiver: Option<String>,
    base_expression: String,
    score: u32,
}

impl Match {
    pub fn element(&self) -> &CodeElement {
        &self.element
    }

    pub fn arguments(&self) -> &[BoundArgument] {
        &self.arguments
    }

    /// Explicit receiver expression, when the reference was qualified by a parameter
    pub fn receiver(&self) -> Option<&str> {
        self.receiver.as_deref()
    }

    /// Invocation of the candidate with arguments substituted, e.g. `indexOf(args[0])`
    pub fn base_expression(&self) -> &str {
        &self.base_expression
    }

    /// Total argument distance; 0 is an exact match
    pub fn score(&self) -> u32 {
        self.score
    }
}

/// Argument-type driven overload resolver.
#[derive(Debug, Clone, Default)]
pub struct OverloadResolver {
    resolution: ResolutionConfig,
    synthesis: SynthesisConfig,
}

impl OverloadResolver {
    pub fn new(resolution: ResolutionConfig, synthesis: SynthesisConfig) -> Self {
        Self {
            resolution,
            synthesis,
        }
    }

    /// Best candidate for `reference`, or `None` when nothing is compatible.
    pub fn resolve(
        &self,
        reference: &MethodReference,
        member: &DocumentedMember,
        candidates: &[&CodeElement],
        hierarchy: &dyn TypeHierarchy,
    ) -> Option<Match> {
        let explicit: Vec<BoundArgument> = reference
            .arguments
            .iter()
            .map(|a| bind_argument(a, member, &self.synthesis))
            .collect();
        let receiver = self.receiver(reference, member);

        let mut best: Option<(u32, &CodeElement, Vec<BoundArgument>)> = None;
        for &candidate in candidates {
            let Some(arguments) = self.arguments_for(candidate, &explicit, member) else {
                trace!(candidate = %candidate, "arity mismatch");
                continue;
            };
            let Some(score) = self.score(candidate, &arguments, hierarchy) else {
                trace!(candidate = %candidate, "incompatible arguments");
                continue;
            };
            // strict comparison keeps the earliest declaration on ties
            if best.as_ref().map_or(true, |(s, _, _)| score < *s) {
                best = Some((score, candidate, arguments));
            }
        }

        best.map(|(score, element, arguments)| {
            let base_expression = base_expression(element, &arguments, receiver.as_deref());
            Match {
                element: element.clone(),
                arguments,
                receiver,
                base_expression,
                score,
            }
        })
    }

    fn arguments_for(
        &self,
        candidate: &CodeElement,
        explicit: &[BoundArgument],
        member: &DocumentedMember,
    ) -> Option<Vec<BoundArgument>> {
        if candidate.kind() == ElementKind::Field {
            return explicit.is_empty().then(Vec::new);
        }
        if !explicit.is_empty() {
            return (explicit.len() == candidate.arity()).then(|| explicit.to_vec());
        }
        if candidate.arity() == 0 {
            return Some(Vec::new());
        }
        if self.resolution.fallback_to_member_parameters
            && member.parameters().len() == candidate.arity()
        {
            return Some(member_parameters(member, &self.synthesis));
        }
        None
    }

    fn score(
        &self,
        candidate: &CodeElement,
        arguments: &[BoundArgument],
        hierarchy: &dyn TypeHierarchy,
    ) -> Option<u32> {
        arguments
            .iter()
            .zip(candidate.parameter_types())
            .try_fold(0u32, |total, (argument, parameter)| {
                let distance = argument_distance(&argument.argument_type, parameter, hierarchy)?;
                (distance <= self.resolution.max_argument_distance).then_some(total + distance)
            })
    }

    // A qualifier naming a parameter becomes an explicit receiver; `this` and
    // other qualifiers resolve against the documented member's own type.
    fn receiver(&self, reference: &MethodReference, member: &DocumentedMember) -> Option<String> {
        let qualifier = reference.qualifier.as_deref()?;
        member
            .parameter_index(qualifier)
            .map(|index| self.synthesis.argument(index))
    }
}

fn base_expression(element: &CodeElement, arguments: &[BoundArgument], receiver: Option<&str>) -> String {
    let args = arguments
        .iter()
        .map(|a| a.expression.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let owner = element.declaring_type().simple_name();

    match (element.kind(), receiver) {
        (ElementKind::Constructor, _) => format!("new {}({})", owner, args),
        (ElementKind::Field, Some(r)) => format!("{}.{}", r, element.name()),
        (ElementKind::Field, None) if element.is_static() => format!("{}.{}", owner, element.name()),
        (ElementKind::Field, None) => element.name().to_string(),
        (ElementKind::Method, Some(r)) => format!("{}.{}({})", r, element.name(), args),
        (ElementKind::Method, None) if element.is_static() => {
            format!("{}.{}({})", owner, element.name(), args)
        }
        (ElementKind::Method, None) => format!("{}({})", element.name(), args),
    }
}

#[cfg(test)]
#[path = "overload_tests.rs"]
mod tests;

//! Building oracle expressions from resolved matches.

use crate::core::config::SynthesisConfig;
use crate::matching::overload::Match;
use crate::model::member::DocumentedMember;
use crate::oracle::expr::{EqualityOperator, OracleExpr};

#[derive(Debug, Clone, Default)]
pub struct OracleSynthesizer {
    synthesis: SynthesisConfig,
}

impl OracleSynthesizer {
    pub fn new(synthesis: SynthesisConfig) -> Self {
        Self { synthesis }
    }

    /// `==` for primitive results, `.equals` for everything else
    pub fn operator_for(member: &DocumentedMember) -> EqualityOperator {
        if member.return_type().is_primitive() {
            EqualityOperator::Identity
        } else {
            EqualityOperator::Equals
        }
    }

    pub fn synthesize(
        &self,
        member: &DocumentedMember,
        matched: &Match,
        negated: bool,
        guard: Option<&str>,
    ) -> OracleExpr {
        let oracle = OracleExpr::equality(
            self.synthesis.result_placeholder.clone(),
            Self::operator_for(member),
            negated,
            matched.base_expression(),
        );
        match guard {
            Some(guard) => oracle.guarded(guard),
            None => oracle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::overload::OverloadResolver;
    use crate::matching::types::FlatHierarchy;
    use crate::model::code_element::CodeElement;
    use crate::model::equivalence::MethodReference;

    fn matched(member: &DocumentedMember, candidate: &CodeElement, args: &[&str]) -> Match {
        let reference = MethodReference::new(
            candidate.name(),
            args.iter().map(|a| a.to_string()).collect(),
        );
        OverloadResolver::default()
            .resolve(&reference, member, &[candidate], &FlatHierarchy)
            .unwrap()
    }

    #[test]
    fn primitive_results_use_identity() {
        let member = DocumentedMember::method("java.util.List", "isEmptyList", "boolean");
        let candidate = CodeElement::method("java.util.List", "isEmpty", "boolean");
        let oracle = OracleSynthesizer::default().synthesize(&member, &matched(&member, &candidate, &[]), true, None);
        assert_eq!(oracle.render(), "RESULT==!isEmpty()");
    }

    #[test]
    fn reference_results_use_equals_and_guards() {
        let member = DocumentedMember::method("java.util.List", "head", "java.lang.Object")
            .with_parameter("fallback", "java.lang.Object");
        let candidate = CodeElement::method("java.util.List", "get", "java.lang.Object").with_parameter("int");
        let m = matched(&member, &candidate, &["0"]);
        let oracle = OracleSynthesizer::default().synthesize(&member, &m, false, Some("!isEmpty()"));
        assert_eq!(oracle.render(), "if (!isEmpty()) {RESULT.equals(get(0))}");
    }

    #[test]
    fn result_placeholder_is_configurable() {
        let member = DocumentedMember::method("java.util.List", "count", "int");
        let candidate = CodeElement::method("java.util.List", "size", "int");
        let synthesizer = OracleSynthesizer::new(SynthesisConfig {
            result_placeholder: "result".into(),
            ..SynthesisConfig::default()
        });
        let oracle = synthesizer.synthesize(&member, &matched(&member, &candidate, &[]), false, None);
        assert_eq!(oracle.render(), "result==size()");
    }
}

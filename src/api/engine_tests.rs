use super::*;
use crate::catalog::enumerator::StaticEnumerator;
use crate::core::config::SynthesisConfig;
use crate::model::proposition::PropositionSeries;

fn list_candidates() -> Vec<CodeElement> {
    vec![
        CodeElement::method("java.util.ArrayList", "isEmpty", "boolean"),
        CodeElement::method("java.util.ArrayList", "size", "int"),
        CodeElement::method("java.util.ArrayList", "get", "java.lang.Object").with_parameter("int"),
        CodeElement::method("java.util.ArrayList", "indexOf", "int").with_parameter("java.lang.Object"),
        CodeElement::method("java.util.ArrayList", "clear", "void"),
    ]
}

fn translator() -> FreeTextTranslator {
    translator_with(DocOracleConfig::default())
}

fn translator_with(config: DocOracleConfig) -> FreeTextTranslator {
    FreeTextTranslator::new(config, Arc::new(StaticEnumerator::new(list_candidates()))).unwrap()
}

fn fixed_guards(translations: &'static [&'static str]) -> Arc<dyn GuardTranslator> {
    Arc::new(move |_: &str, _: &DocumentedMember| -> Result<Vec<PropositionSeries>> {
        Ok(translations
            .iter()
            .map(|t| PropositionSeries::from_translation(*t))
            .collect())
    })
}

fn boolean_member(comment: &str) -> DocumentedMember {
    DocumentedMember::method("java.util.ArrayList", "isEmptyList", "boolean").with_comment(comment)
}

#[test]
fn conditional_equivalence_is_guarded() {
    let member = boolean_member("Returns the same as isEmpty(), if the list has no elements");
    let matches = translator()
        .with_guard_translator(fixed_guards(&["guardPredicate"]))
        .translate(&member)
        .unwrap();

    assert_eq!(matches.len(), 1);
    assert!(matches[0].is_similarity());
    assert_eq!(matches[0].simple_name(), "isEmpty");
    assert_eq!(matches[0].oracle(), Some("if (guardPredicate) {RESULT==isEmpty()}"));
}

#[test]
fn shipped_guard_translator_handles_receiver_emptiness() {
    let member = boolean_member("Returns the same as isEmpty(), if the list has no elements");
    let matches = translator().translate(&member).unwrap();
    assert_eq!(matches[0].oracle(), Some("if (isEmpty()) {RESULT==isEmpty()}"));
}

#[test]
fn empty_guard_translation_leaves_oracle_unset() {
    let member = boolean_member("Returns the same as isEmpty(), if the list has no elements");
    let matches = translator()
        .with_guard_translator(fixed_guards(&[""]))
        .translate(&member)
        .unwrap();

    assert!(matches[0].is_detected());
    assert!(matches[0].oracle().is_none());
    assert_eq!(
        matches[0].unresolved_reason(),
        Some(&UnresolvedReason::EmptyGuardTranslation)
    );
}

#[test]
fn negated_equivalence_negates_the_base() {
    let member = boolean_member("Returns a value that is never equivalent to isEmpty()");
    let matches = translator().translate(&member).unwrap();
    assert!(matches[0].is_negated());
    assert!(!matches[0].is_similarity());
    assert_eq!(matches[0].oracle(), Some("RESULT==!isEmpty()"));
}

#[test]
fn reference_results_use_equals() {
    let member = DocumentedMember::method("java.util.ArrayList", "first", "java.lang.Object")
        .with_comment("Same as get(0).");
    let matches = translator().translate(&member).unwrap();
    assert_eq!(matches[0].oracle(), Some("RESULT.equals(get(0))"));
}

#[test]
fn every_sentence_is_recorded_in_order() {
    let member = boolean_member("Checks the list. Equivalent to isEmpty(). It is fast; no allocation happens.");
    let matches = translator().translate(&member).unwrap();
    let sentences: Vec<_> = matches.iter().map(EquivalenceMatch::sentence).collect();
    assert_eq!(
        sentences,
        vec!["Checks the list", "Equivalent to isEmpty()", "It is fast", "no allocation happens."]
    );
    assert_eq!(matches.iter().filter(|m| m.is_resolved()).count(), 1);
    assert_eq!(matches[0].simple_name(), "");
}

#[test]
fn unresolved_reasons_are_reported() {
    let member = boolean_member(
        "Similar to isEmpty(). Same as frobnicate(). Same as indexOf(1, 2). Same as clear().",
    );
    let matches = translator().translate(&member).unwrap();
    let reasons: Vec<_> = matches
        .iter()
        .map(|m| m.unresolved_reason().cloned())
        .collect();
    assert_eq!(reasons[0], Some(UnresolvedReason::NoGuard));
    assert_eq!(reasons[1], Some(UnresolvedReason::NoSubjectMatch));
    assert_eq!(reasons[2], Some(UnresolvedReason::NoCompatibleOverload));
    assert!(matches!(reasons[3], Some(UnresolvedReason::StructurallyInvalid(_))));
}

#[test]
fn structurally_invalid_oracles_are_discarded() {
    let member = boolean_member("Same as size().");
    let matches = translator().translate(&member).unwrap();
    assert!(matches[0].oracle().is_none());
    assert!(matches!(
        matches[0].unresolved_reason(),
        Some(UnresolvedReason::StructurallyInvalid(_))
    ));
}

#[test]
fn validator_rejection_leaves_oracle_unset() {
    let reject = Arc::new(|_: &DocumentedMember, _: &str, _: &str| -> Result<bool> { Ok(false) });
    let member = boolean_member("Equivalent to isEmpty()");
    let matches = translator().with_validator(reject).translate(&member).unwrap();
    assert!(matches[0].oracle().is_none());
    assert!(matches[0].candidate_oracles().is_empty());
    assert_eq!(matches[0].unresolved_reason(), Some(&UnresolvedReason::ValidationRejected));
}

#[test]
fn several_guards_keep_every_accepted_oracle() {
    let member = boolean_member("Same as isEmpty() when the list has no elements, otherwise false");
    let last = translator()
        .with_guard_translator(fixed_guards(&["a", "", "b"]))
        .translate(&member)
        .unwrap();
    assert_eq!(
        last[0].candidate_oracles(),
        &["if (a) {RESULT==isEmpty()}".to_string(), "if (b) {RESULT==isEmpty()}".to_string()]
    );
    assert_eq!(last[0].oracle(), Some("if (b) {RESULT==isEmpty()}"));

    let mut config = DocOracleConfig::default();
    config.synthesis = SynthesisConfig {
        oracle_selection: OracleSelection::First,
        ..SynthesisConfig::default()
    };
    let first = translator_with(config)
        .with_guard_translator(fixed_guards(&["a", "b"]))
        .translate(&member)
        .unwrap();
    assert_eq!(first[0].oracle(), Some("if (a) {RESULT==isEmpty()}"));
}

struct FailingEnumerator;

impl CandidateEnumerator for FailingEnumerator {
    fn enumerate(&self, _member: &DocumentedMember) -> Result<Vec<CodeElement>> {
        Err(DocOracleError::collaborator("candidate enumerator", "reflection unavailable"))
    }
}

#[test]
fn collaborator_failure_keeps_earlier_sentences() {
    let member = boolean_member("Checks the list. Same as isEmpty().");
    let translator = translator().with_enumerator(Arc::new(FailingEnumerator));

    let outcome = translator.translate_isolated(&member);
    assert!(outcome.is_failed());
    assert_eq!(outcome.matches.len(), 1);
    assert!(translator.translate(&member).is_err());
}

#[test]
fn members_without_equivalences_never_enumerate() {
    let member = boolean_member("Checks the list. Runs in constant time.");
    let matches = translator()
        .with_enumerator(Arc::new(FailingEnumerator))
        .translate(&member)
        .unwrap();
    assert!(matches.iter().all(|m| !m.is_detected() && m.oracle().is_none()));
}

#[test]
fn members_without_comments_produce_nothing() {
    let member = DocumentedMember::method("java.util.ArrayList", "size", "int");
    assert!(translator().translate(&member).unwrap().is_empty());
}

#[test]
fn parallel_analysis_keeps_member_order() {
    let members: Vec<DocumentedMember> = (0..32)
        .map(|i| {
            DocumentedMember::method("java.util.ArrayList", format!("check{}", i), "boolean")
                .with_comment("Equivalent to isEmpty(). Fails otherwise.")
        })
        .collect();
    let failing = DocumentedMember::method("java.util.ArrayList", "broken", "boolean")
        .with_comment("Same as isEmpty().");

    let report = translator().analyze_members(&members);
    let signatures: Vec<_> = report.members.iter().map(|m| m.signature.clone()).collect();
    let expected: Vec<_> = members.iter().map(DocumentedMember::signature).collect();
    assert_eq!(signatures, expected);
    assert_eq!(report.summary.resolved, 32);

    let report = translator()
        .with_enumerator(Arc::new(FailingEnumerator))
        .analyze_members(&[members[0].clone(), failing]);
    assert_eq!(report.summary.failed_members, 2);
    assert_eq!(report.summary.sentences, 0);
}

#[test]
fn negation_inside_the_guard_is_not_carried_into_the_oracle() {
    let member = DocumentedMember::method("java.util.ArrayList", "check", "boolean")
        .with_parameter("index", "int")
        .with_comment("If index is not equal to 0, same as isEmpty()");
    let matches = translator().translate(&member).unwrap();
    assert!(!matches[0].is_negated());
    assert_eq!(matches[0].oracle(), Some("if (args[0] != 0) {RESULT==isEmpty()}"));

    let member = member.with_comment("When index is not equal to 0, the result is the same as isEmpty()");
    let matches = translator().translate(&member).unwrap();
    assert_eq!(matches[0].oracle(), Some("if (args[0] != 0) {RESULT==isEmpty()}"));
}

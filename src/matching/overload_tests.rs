use super::*;
use crate::matching::types::{ArgumentType, FlatHierarchy, OBJECT_DISTANCE};
use crate::model::types::TypeName;

fn list_member() -> DocumentedMember {
    DocumentedMember::method("java.util.List", "lastIndexOf", "int")
        .with_parameter("o", "java.lang.Object")
        .with_parameter("from", "int")
}

fn reference(name: &str, args: &[&str]) -> MethodReference {
    MethodReference::new(name, args.iter().map(|a| a.to_string()).collect())
}

fn resolve(reference: &MethodReference, member: &DocumentedMember, candidates: &[CodeElement]) -> Option<Match> {
    let refs: Vec<&CodeElement> = candidates.iter().collect();
    OverloadResolver::default().resolve(reference, member, &refs, &FlatHierarchy)
}

#[test]
fn zero_arity_candidate_needs_no_arguments() {
    let candidates = vec![CodeElement::method("java.util.List", "isEmpty", "boolean")];
    let member = DocumentedMember::method("java.util.List", "isEmptyList", "boolean");
    let matched = resolve(&reference("isEmpty", &[]), &member, &candidates).unwrap();
    assert_eq!(matched.base_expression(), "isEmpty()");
    assert_eq!(matched.score(), 0);
}

#[test]
fn exact_types_beat_widening() {
    let candidates = vec![
        CodeElement::method("Math", "abs", "long").with_parameter("long").with_static(true),
        CodeElement::method("Math", "abs", "int").with_parameter("int").with_static(true),
    ];
    let member = DocumentedMember::method("Util", "magnitude", "int").with_parameter("value", "int");
    let matched = resolve(&reference("abs", &["value"]), &member, &candidates).unwrap();
    assert_eq!(matched.element().return_type().as_str(), "int");
    assert_eq!(matched.base_expression(), "Math.abs(args[0])");
}

#[test]
fn widening_beats_boxing() {
    let candidates = vec![
        CodeElement::method("M", "f", "boolean").with_parameter("Integer"),
        CodeElement::method("M", "f", "boolean").with_parameter("double"),
    ];
    let member = DocumentedMember::method("M", "g", "boolean").with_parameter("v", "int");
    let matched = resolve(&reference("f", &["v"]), &member, &candidates).unwrap();
    assert_eq!(matched.element().parameter_types()[0].as_str(), "double");
    assert_eq!(matched.score(), 3);
}

#[test]
fn ties_keep_declaration_order() {
    let candidates = vec![
        CodeElement::method("Sink", "accept", "void").with_parameter("String"),
        CodeElement::method("Sink", "accept", "void").with_parameter("Integer"),
    ];
    let member = DocumentedMember::method("Sink", "offer", "boolean");
    let matched = resolve(&reference("accept", &["null"]), &member, &candidates).unwrap();
    assert_eq!(matched.element().parameter_types()[0].as_str(), "String");
}

#[test]
fn arity_mismatch_disqualifies() {
    let candidates = vec![CodeElement::method("java.util.List", "indexOf", "int").with_parameter("Object")];
    let member = list_member();
    assert!(resolve(&reference("indexOf", &["o", "from"]), &member, &candidates).is_none());
}

#[test]
fn member_parameters_fill_missing_arguments() {
    let candidates = vec![
        CodeElement::method("java.util.List", "indexOf", "int").with_parameter("Object"),
        CodeElement::method("java.util.List", "indexOf", "int")
            .with_parameter("Object")
            .with_parameter("int"),
    ];
    let matched = resolve(&reference("indexOf", &[]), &list_member(), &candidates).unwrap();
    assert_eq!(matched.base_expression(), "indexOf(args[0], args[1])");
    assert_eq!(matched.arguments().len(), 2);
}

#[test]
fn fallback_can_be_disabled() {
    let candidates = vec![CodeElement::method("java.util.List", "indexOf", "int")
        .with_parameter("Object")
        .with_parameter("int")];
    let resolver = OverloadResolver::new(
        ResolutionConfig {
            fallback_to_member_parameters: false,
            ..ResolutionConfig::default()
        },
        SynthesisConfig::default(),
    );
    let refs: Vec<&CodeElement> = candidates.iter().collect();
    assert!(resolver
        .resolve(&reference("indexOf", &[]), &list_member(), &refs, &FlatHierarchy)
        .is_none());
}

#[test]
fn distance_ceiling_rejects_weak_bindings() {
    let candidates = vec![CodeElement::method("Registry", "lookup", "Object").with_parameter("Object")];
    let member = DocumentedMember::method("Registry", "find", "Object").with_parameter("key", "String");
    let resolver = OverloadResolver::new(
        ResolutionConfig {
            max_argument_distance: OBJECT_DISTANCE - 1,
            ..ResolutionConfig::default()
        },
        SynthesisConfig::default(),
    );
    let refs: Vec<&CodeElement> = candidates.iter().collect();
    assert!(resolver
        .resolve(&reference("lookup", &["key"]), &member, &refs, &FlatHierarchy)
        .is_none());
    assert!(resolve(&reference("lookup", &["key"]), &member, &candidates).is_some());
}

#[test]
fn constructors_and_receivers_render_their_base_expression() {
    let ctor = vec![CodeElement::constructor("java.util.ArrayList").with_parameter("int")];
    let member = DocumentedMember::method("Lists", "withCapacity", "java.util.ArrayList")
        .with_parameter("n", "int")
        .with_static(true);
    let matched = resolve(&reference("ArrayList", &["n"]), &member, &ctor).unwrap();
    assert_eq!(matched.base_expression(), "new ArrayList(args[0])");

    let mut qualified = reference("equals", &["this"]);
    qualified.qualifier = Some("other".into());
    let equals = vec![CodeElement::method("Point", "equals", "boolean").with_parameter("Object")];
    let member = DocumentedMember::method("Point", "sameAs", "boolean").with_parameter("other", "Point");
    let matched = resolve(&qualified, &member, &equals).unwrap();
    assert_eq!(matched.receiver(), Some("args[0]"));
    assert_eq!(matched.base_expression(), "args[0].equals(this)");
    assert_eq!(
        matched.arguments()[0].argument_type,
        ArgumentType::Known(TypeName::new("Point"))
    );
}

#[test]
fn fields_resolve_only_without_arguments() {
    let candidates = vec![CodeElement::field("Buffer", "limit", "int")];
    let member = DocumentedMember::method("Buffer", "capacity", "int");
    let matched = resolve(&reference("limit", &[]), &member, &candidates).unwrap();
    assert_eq!(matched.base_expression(), "limit");
    assert!(resolve(&reference("limit", &["0"]), &member, &candidates).is_none());
}

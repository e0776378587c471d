//! Rule-based guard translation for common documentation prose.
//!
//! A clause such as `if the given key is null or the map is empty` is split
//! at `and` / `or` into propositions. Each proposition is a subject (a
//! parameter of the documented member, or the receiver) followed by a known
//! predicate phrase. Anything outside that vocabulary is left untranslated,
//! which empties the whole series.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::config::{ConditionConfig, SynthesisConfig};
use crate::core::errors::Result;
use crate::guard::translator::GuardTranslator;
use crate::matching::arguments::bind_argument;
use crate::matching::types::ArgumentType;
use crate::model::member::DocumentedMember;
use crate::model::proposition::{Conjunction, Proposition, PropositionSeries};
use crate::model::types::TypeName;

static CONJUNCTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s+\b(and|or)\b\s+").expect("valid pattern"));
static LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(?:-?\d+(?:\.\d+)?[lLfFdD]?|null|true|false|"[^"]*"|'[^']')$"#)
        .expect("valid pattern")
});

const ARTICLES: &[&str] = &[
    "the given ",
    "the specified ",
    "the provided ",
    "given ",
    "specified ",
    "the ",
    "a ",
    "an ",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Predicate {
    Null,
    NotNull,
    Empty,
    NotEmpty,
    Negative,
    Positive,
    Zero,
    True,
    False,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comparison {
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
    Equal,
    NotEqual,
}

impl Comparison {
    fn operator(self) -> &'static str {
        match self {
            Self::Greater => ">",
            Self::GreaterOrEqual => ">=",
            Self::Less => "<",
            Self::LessOrEqual => "<=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
        }
    }
}

// More specific phrases come first.
const UNARY: &[(&str, Predicate)] = &[
    ("is not null", Predicate::NotNull),
    ("is non-null", Predicate::NotNull),
    ("is null", Predicate::Null),
    ("is not empty", Predicate::NotEmpty),
    ("is non-empty", Predicate::NotEmpty),
    ("has elements", Predicate::NotEmpty),
    ("contains elements", Predicate::NotEmpty),
    ("is empty", Predicate::Empty),
    ("has no elements", Predicate::Empty),
    ("contains no elements", Predicate::Empty),
    ("is negative", Predicate::Negative),
    ("is positive", Predicate::Positive),
    ("is zero", Predicate::Zero),
    ("is true", Predicate::True),
    ("is false", Predicate::False),
];

const BINARY: &[(&str, Comparison)] = &[
    ("is greater than or equal to", Comparison::GreaterOrEqual),
    ("is at least", Comparison::GreaterOrEqual),
    ("is less than or equal to", Comparison::LessOrEqual),
    ("is at most", Comparison::LessOrEqual),
    ("is greater than", Comparison::Greater),
    ("is larger than", Comparison::Greater),
    ("exceeds", Comparison::Greater),
    ("is less than", Comparison::Less),
    ("is smaller than", Comparison::Less),
    ("is not equal to", Comparison::NotEqual),
    ("does not equal", Comparison::NotEqual),
    ("is equal to", Comparison::Equal),
    ("equals", Comparison::Equal),
];

#[derive(Debug, Clone)]
struct Operand {
    expression: String,
    type_name: Option<TypeName>,
    receiver: bool,
}

impl Operand {
    fn is_null(&self) -> bool {
        self.expression == "null"
    }

    fn is_numeric(&self) -> bool {
        self.type_name
            .as_ref()
            .and_then(TypeName::as_primitive)
            .is_some_and(|t| t.is_numeric_primitive())
    }

    fn is_boolean(&self) -> bool {
        self.type_name.as_ref().is_some_and(TypeName::is_boolean)
    }

    fn is_reference(&self) -> bool {
        self.type_name.as_ref().is_some_and(TypeName::is_reference)
    }

    fn is_primitive(&self) -> bool {
        self.type_name.as_ref().is_some_and(TypeName::is_primitive)
    }

    // Receiver calls render bare: `isEmpty()` rather than `this.isEmpty()`.
    fn call(&self, method: &str) -> String {
        if self.receiver {
            format!("{}()", method)
        } else {
            format!("{}.{}()", self.expression, method)
        }
    }
}

/// Pattern translator for guard clauses over parameters and the receiver.
#[derive(Debug)]
pub struct PatternGuardTranslator {
    marker: Regex,
    unary: Vec<(Regex, Predicate)>,
    binary: Vec<(Regex, Comparison)>,
    synthesis: SynthesisConfig,
}

impl PatternGuardTranslator {
    pub fn new(condition: &ConditionConfig, synthesis: &SynthesisConfig) -> Result<Self> {
        let markers = condition
            .markers
            .iter()
            .map(|m| regex::escape(m.trim()))
            .collect::<Vec<_>>()
            .join("|");
        let marker = Regex::new(&format!(r"(?i)^\s*(?:{})\b\s*", markers))?;

        let unary = UNARY
            .iter()
            .map(|(phrase, p)| {
                Regex::new(&format!(r"(?i)^(?P<subject>.*?)\s*\b{}\s*$", words(phrase)))
                    .map(|re| (re, *p))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let binary = BINARY
            .iter()
            .map(|(phrase, c)| {
                Regex::new(&format!(
                    r"(?i)^(?P<subject>.*?)\s*\b{}\s+(?P<object>\S.*?)\s*$",
                    words(phrase)
                ))
                .map(|re| (re, *c))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            marker,
            unary,
            binary,
            synthesis: synthesis.clone(),
        })
    }

    fn proposition(&self, text: &str, member: &DocumentedMember) -> Proposition {
        let text = text.trim();
        for (re, predicate) in &self.unary {
            if let Some(caps) = re.captures(text) {
                let subject_text = caps.name("subject").map_or("", |m| m.as_str());
                let translation = self
                    .subject(subject_text, member)
                    .and_then(|s| render_unary(&s, *predicate));
                return Proposition {
                    subject: subject_text.to_string(),
                    predicate: text[subject_text.len()..].trim().to_string(),
                    translation,
                };
            }
        }
        for (re, comparison) in &self.binary {
            if let Some(caps) = re.captures(text) {
                let subject_text = caps.name("subject").map_or("", |m| m.as_str());
                let object_text = caps.name("object").map_or("", |m| m.as_str());
                let translation = self.subject(subject_text, member).and_then(|s| {
                    let o = self.object(object_text, member)?;
                    render_comparison(&s, *comparison, &o)
                });
                return Proposition {
                    subject: subject_text.to_string(),
                    predicate: text[subject_text.len()..].trim().to_string(),
                    translation,
                };
            }
        }
        Proposition {
            subject: text.to_string(),
            predicate: String::new(),
            translation: None,
        }
    }

    fn subject(&self, text: &str, member: &DocumentedMember) -> Option<Operand> {
        let stripped = strip_articles(text.trim());
        let receiver = Operand {
            expression: "this".to_string(),
            type_name: Some(member.declaring_type().clone()),
            receiver: true,
        };

        let lower = stripped.to_ascii_lowercase();
        if lower.is_empty() || lower == "it" || lower == "this" || lower.starts_with("this ") {
            return Some(receiver);
        }

        let last = stripped.split_whitespace().last()?;
        if let Some(index) = member.parameter_index(stripped).or_else(|| member.parameter_index(last)) {
            return Some(Operand {
                expression: self.synthesis.argument(index),
                type_name: Some(member.parameters()[index].type_name.clone()),
                receiver: false,
            });
        }

        // "the list" names an `ArrayList` receiver
        let noun = last.to_ascii_lowercase();
        let owner = member.declaring_type().simple_name().to_ascii_lowercase();
        (noun.len() >= 3 && owner.ends_with(&noun)).then_some(receiver)
    }

    fn object(&self, text: &str, member: &DocumentedMember) -> Option<Operand> {
        let text = text.trim().trim_end_matches(['.', ';']);
        if LITERAL.is_match(text) {
            let bound = bind_argument(text, member, &self.synthesis);
            let type_name = match bound.argument_type {
                ArgumentType::Known(t) => Some(t),
                ArgumentType::Null | ArgumentType::Unknown => None,
            };
            return Some(Operand {
                expression: bound.expression,
                type_name,
                receiver: false,
            });
        }
        self.subject(text, member)
    }
}

impl GuardTranslator for PatternGuardTranslator {
    fn translate(&self, clause: &str, member: &DocumentedMember) -> Result<Vec<PropositionSeries>> {
        let body = self.marker.replace(clause, "");
        let body = body.trim().trim_end_matches(['.', ';']).trim();
        if body.is_empty() {
            return Ok(Vec::new());
        }

        let (parts, conjunctions) = split_propositions(body);
        let propositions = parts
            .into_iter()
            .map(|part| self.proposition(part, member))
            .collect();
        Ok(vec![PropositionSeries::new(propositions, conjunctions)])
    }
}

fn words(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+")
}

fn strip_articles(text: &str) -> &str {
    let mut text = text;
    loop {
        let lower = text.to_ascii_lowercase();
        match ARTICLES.iter().find(|a| lower.starts_with(*a)) {
            Some(article) => text = text[article.len()..].trim_start(),
            None => return text,
        }
    }
}

// `or` inside "greater than or equal to" is part of the predicate.
fn split_propositions(text: &str) -> (Vec<&str>, Vec<Conjunction>) {
    let mut parts = Vec::new();
    let mut conjunctions = Vec::new();
    let mut start = 0;
    for caps in CONJUNCTION.captures_iter(text) {
        let (Some(whole), Some(word)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let conjunction = if word.as_str().eq_ignore_ascii_case("and") {
            Conjunction::And
        } else {
            Conjunction::Or
        };
        let rest = text[whole.end()..].to_ascii_lowercase();
        if conjunction == Conjunction::Or && rest.starts_with("equal") {
            continue;
        }
        parts.push(&text[start..whole.start()]);
        conjunctions.push(conjunction);
        start = whole.end();
    }
    parts.push(&text[start..]);
    (parts, conjunctions)
}

fn render_unary(subject: &Operand, predicate: Predicate) -> Option<String> {
    let e = &subject.expression;
    match predicate {
        Predicate::Null if subject.is_reference() && !subject.receiver => Some(format!("{} == null", e)),
        Predicate::NotNull if subject.is_reference() && !subject.receiver => Some(format!("{} != null", e)),
        Predicate::Empty if subject.is_reference() => Some(subject.call("isEmpty")),
        Predicate::NotEmpty if subject.is_reference() => Some(format!("!{}", subject.call("isEmpty"))),
        Predicate::Negative if subject.is_numeric() => Some(format!("{} < 0", e)),
        Predicate::Positive if subject.is_numeric() => Some(format!("{} > 0", e)),
        Predicate::Zero if subject.is_numeric() => Some(format!("{} == 0", e)),
        Predicate::True if subject.is_boolean() && !subject.receiver => Some(e.clone()),
        Predicate::False if subject.is_boolean() && !subject.receiver => Some(format!("!{}", e)),
        _ => None,
    }
}

fn render_comparison(subject: &Operand, comparison: Comparison, object: &Operand) -> Option<String> {
    let (s, o) = (&subject.expression, &object.expression);
    match comparison {
        Comparison::Equal | Comparison::NotEqual => {
            let negate = comparison == Comparison::NotEqual;
            if object.is_null() {
                return (subject.is_reference() && !subject.receiver)
                    .then(|| format!("{} {} null", s, comparison.operator()));
            }
            if subject.is_primitive() {
                return (object.is_numeric() == subject.is_numeric())
                    .then(|| format!("{} {} {}", s, comparison.operator(), o));
            }
            let call = if subject.receiver {
                format!("equals({})", o)
            } else {
                format!("{}.equals({})", s, o)
            };
            Some(if negate { format!("!{}", call) } else { call })
        }
        _ => (subject.is_numeric() && object.is_numeric())
            .then(|| format!("{} {} {}", s, comparison.operator(), o)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator() -> PatternGuardTranslator {
        PatternGuardTranslator::new(&ConditionConfig::default(), &SynthesisConfig::default()).unwrap()
    }

    fn member() -> DocumentedMember {
        DocumentedMember::method("java.util.ArrayList", "addAll", "boolean")
            .with_parameter("index", "int")
            .with_parameter("c", "java.util.Collection")
            .with_parameter("fair", "boolean")
            .with_parameter("limit", "int")
    }

    fn translate(clause: &str) -> String {
        let series = translator().translate(clause, &member()).unwrap();
        assert_eq!(series.len(), 1);
        series[0].translation().to_string()
    }

    #[test]
    fn receiver_emptiness() {
        assert_eq!(translate("if the list has no elements"), "isEmpty()");
        assert_eq!(translate("when this list is not empty"), "!isEmpty()");
    }

    #[test]
    fn parameter_predicates() {
        assert_eq!(translate("if c is null"), "args[1] == null");
        assert_eq!(translate("if the given collection c is empty"), "args[1].isEmpty()");
        assert_eq!(translate("if index is negative"), "args[0] < 0");
        assert_eq!(translate("if fair is false"), "!args[2]");
    }

    #[test]
    fn conjunctions_join_propositions() {
        assert_eq!(
            translate("if index is negative or index is at least limit"),
            "args[0] < 0 || args[0] >= args[3]"
        );
        assert_eq!(
            translate("when c is not empty and fair is true"),
            "!args[1].isEmpty() && args[2]"
        );
    }

    #[test]
    fn or_equal_stays_inside_the_predicate() {
        assert_eq!(
            translate("if the index is greater than or equal to 10"),
            "args[0] >= 10"
        );
    }

    #[test]
    fn reference_equality_uses_equals() {
        assert_eq!(translate("if c equals this"), "args[1].equals(this)");
        assert_eq!(translate("if index is equal to limit"), "args[0] == args[3]");
    }

    #[test]
    fn unknown_vocabulary_leaves_translation_empty() {
        assert_eq!(translate("if the moon is full"), "");
        assert_eq!(translate("if index is null"), "");
        assert_eq!(translate("if c is negative and fair is true"), "");
    }

    #[test]
    fn bare_marker_yields_no_series() {
        let series = translator().translate("if", &member()).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn propositions_keep_subject_and_predicate_text() {
        let series = translator().translate("if c is null", &member()).unwrap();
        let proposition = &series[0].propositions()[0];
        assert_eq!(proposition.subject, "c");
        assert_eq!(proposition.predicate, "is null");
    }
}

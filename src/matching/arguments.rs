//! Binding argument expressions written in documentation to typed expressions.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::config::SynthesisConfig;
use crate::matching::types::ArgumentType;
use crate::model::member::DocumentedMember;
use crate::model::types::TypeName;

static INT_LITERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+$").expect("valid pattern"));
static LONG_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d+[lL]$").expect("valid pattern"));
static FLOATING_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?(\d+\.\d*|\.\d+|\d+)([eE][-+]?\d+)?([fFdD])?$").expect("valid pattern"));

/// An argument expression ready for the base expression, with its inferred type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundArgument {
    pub expression: String,
    pub argument_type: ArgumentType,
}

/// Bind one argument expression written in the comment.
///
/// Parameter names of the documented member become argument placeholders,
/// literals get their literal type, `this` gets the declaring type and
/// anything else keeps its text with an unknown type.
pub fn bind_argument(
    text: &str,
    member: &DocumentedMember,
    synthesis: &SynthesisConfig,
) -> BoundArgument {
    let text = text.trim();

    if let Some(index) = member.parameter_index(text) {
        return BoundArgument {
            expression: synthesis.argument(index),
            argument_type: ArgumentType::Known(member.parameters()[index].type_name.clone()),
        };
    }

    let argument_type = literal_type(text).unwrap_or_else(|| match text {
        "this" => ArgumentType::Known(member.declaring_type().clone()),
        _ => ArgumentType::Unknown,
    });

    BoundArgument {
        expression: substitute_parameters(text, member, synthesis),
        argument_type,
    }
}

/// The documented member's own parameters, bound in order.
pub fn member_parameters(member: &DocumentedMember, synthesis: &SynthesisConfig) -> Vec<BoundArgument> {
    member
        .parameters()
        .iter()
        .enumerate()
        .map(|(index, p)| BoundArgument {
            expression: synthesis.argument(index),
            argument_type: ArgumentType::Known(p.type_name.clone()),
        })
        .collect()
}

fn literal_type(text: &str) -> Option<ArgumentType> {
    let known = |t: &str| Some(ArgumentType::Known(TypeName::new(t)));
    match text {
        "null" => return Some(ArgumentType::Null),
        "true" | "false" => return known("boolean"),
        _ => {}
    }
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        return known("java.lang.String");
    }
    if text.len() >= 3 && text.starts_with('\'') && text.ends_with('\'') {
        return known("char");
    }
    if INT_LITERAL.is_match(text) {
        return known("int");
    }
    if LONG_LITERAL.is_match(text) {
        return known("long");
    }
    if let Some(caps) = FLOATING_LITERAL.captures(text) {
        return match caps.get(3).map(|m| m.as_str()) {
            Some("f" | "F") => known("float"),
            _ => known("double"),
        };
    }
    None
}

/// Replace whole-identifier parameter names with placeholders, skipping
/// member selections (`x.name`) and string or char literals.
fn substitute_parameters(
    text: &str,
    member: &DocumentedMember,
    synthesis: &SynthesisConfig,
) -> String {
    if member.parameters().is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();
    let mut quote: Option<char> = None;
    let mut previous_significant: Option<char> = None;

    while let Some((i, c)) = chars.next() {
        if let Some(q) = quote {
            out.push(c);
            if c == '\\' {
                if let Some((_, escaped)) = chars.next() {
                    out.push(escaped);
                }
            } else if c == q {
                quote = None;
                previous_significant = Some(c);
            }
            continue;
        }

        if c == '"' || c == '\'' {
            quote = Some(c);
            out.push(c);
            continue;
        }

        if c.is_alphabetic() || c == '_' || c == '$' {
            let mut end = i + c.len_utf8();
            while let Some(&(j, next)) = chars.peek() {
                if next.is_alphanumeric() || next == '_' || next == '$' {
                    end = j + next.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            let ident = &text[i..end];
            match member.parameter_index(ident) {
                Some(index) if previous_significant != Some('.') => {
                    out.push_str(&synthesis.argument(index));
                }
                _ => out.push_str(ident),
            }
            previous_significant = ident.chars().last();
            continue;
        }

        out.push(c);
        if !c.is_whitespace() {
            previous_significant = Some(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member() -> DocumentedMember {
        DocumentedMember::method("java.util.List", "lastIndexOf", "int")
            .with_parameter("o", "java.lang.Object")
            .with_parameter("index", "int")
    }

    fn bind(text: &str) -> BoundArgument {
        bind_argument(text, &member(), &SynthesisConfig::default())
    }

    #[test]
    fn parameter_names_become_placeholders() {
        let bound = bind("index");
        assert_eq!(bound.expression, "args[1]");
        assert_eq!(bound.argument_type, ArgumentType::Known(TypeName::new("int")));
    }

    #[test]
    fn literals_get_literal_types() {
        assert_eq!(bind("0").argument_type, ArgumentType::Known(TypeName::new("int")));
        assert_eq!(bind("10L").argument_type, ArgumentType::Known(TypeName::new("long")));
        assert_eq!(bind("1.5").argument_type, ArgumentType::Known(TypeName::new("double")));
        assert_eq!(bind("2f").argument_type, ArgumentType::Known(TypeName::new("float")));
        assert_eq!(bind("'c'").argument_type, ArgumentType::Known(TypeName::new("char")));
        assert_eq!(
            bind("\"abc\"").argument_type,
            ArgumentType::Known(TypeName::new("java.lang.String"))
        );
        assert_eq!(bind("null").argument_type, ArgumentType::Null);
        assert_eq!(bind("false").argument_type, ArgumentType::Known(TypeName::new("boolean")));
    }

    #[test]
    fn this_has_declaring_type() {
        assert_eq!(
            bind("this").argument_type,
            ArgumentType::Known(TypeName::new("java.util.List"))
        );
    }

    #[test]
    fn compound_expressions_substitute_parameters() {
        let bound = bind("index + 1");
        assert_eq!(bound.expression, "args[1] + 1");
        assert_eq!(bound.argument_type, ArgumentType::Unknown);

        let bound = bind("o.index");
        assert_eq!(bound.expression, "args[0].index");

        let bound = bind("\"index\" + o");
        assert_eq!(bound.expression, "\"index\" + args[0]");
    }

    #[test]
    fn member_parameters_bind_in_order() {
        let bound = member_parameters(&member(), &SynthesisConfig::default());
        let expressions: Vec<_> = bound.iter().map(|b| b.expression.as_str()).collect();
        assert_eq!(expressions, vec!["args[0]", "args[1]"]);
    }
}

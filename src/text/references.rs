//! Member references written in prose, such as `isEmpty()` or `Math.max(a, b)`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::equivalence::MethodReference;

static CALL_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:([A-Za-z_$][\w$]*(?:\.[A-Za-z_$][\w$]*)*)[.#])?([A-Za-z_$][\w$]*)\s*\(")
        .expect("call pattern is valid")
});

/// A reference plus the byte range it occupies in the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedReference {
    pub reference: MethodReference,
    pub start: usize,
    pub end: usize,
}

/// First well-formed call expression starting at or after byte offset `from`.
///
/// Calls with unbalanced parentheses are skipped.
pub fn find_reference(text: &str, from: usize) -> Option<LocatedReference> {
    let mut offset = from;
    while offset <= text.len() {
        let caps = CALL_START.captures_at(text, offset)?;
        let whole = caps.get(0)?;
        let open = whole.end() - 1;

        if let Some(close) = matching_paren(text, open) {
            let qualifier = caps.get(1).map(|m| m.as_str().to_string());
            let simple_name = caps.get(2)?.as_str().to_string();
            let arguments = split_arguments(&text[open + 1..close]);
            return Some(LocatedReference {
                reference: MethodReference {
                    signature: text[whole.start()..=close].to_string(),
                    qualifier,
                    simple_name,
                    arguments,
                },
                start: whole.start(),
                end: close + 1,
            });
        }
        offset = whole.end();
    }
    None
}

/// Byte offset of the `)` closing the `(` at `open`, skipping string and char literals.
fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in text[open..].char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split an argument list at top-level commas.
///
/// `<`/`>` count as brackets only as generic brackets (directly after an
/// identifier, closed later); comparisons and `->` are plain text.
pub fn split_arguments(inner: &str) -> Vec<String> {
    if inner.trim().is_empty() {
        return Vec::new();
    }
    split_top_level(inner, true).unwrap_or_else(|| {
        split_top_level(inner, false).unwrap_or_else(|| vec![inner.trim().to_string()])
    })
}

// None when generic brackets are left open, so the caller can retry without them.
fn split_top_level(inner: &str, generics: bool) -> Option<Vec<String>> {
    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut angles = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut previous: Option<char> = None;
    let mut current = String::new();

    for c in inner.chars() {
        if let Some(q) = quote {
            current.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            previous = Some(c);
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            '<' if generics && previous.is_some_and(is_identifier_char) => angles += 1,
            '>' if angles > 0 && previous != Some('-') => angles -= 1,
            ',' if depth == 0 && angles == 0 => {
                args.push(current.trim().to_string());
                current.clear();
                previous = Some(c);
                continue;
            }
            _ => {}
        }
        current.push(c);
        previous = Some(c);
    }
    if angles > 0 {
        return None;
    }
    args.push(current.trim().to_string());
    Some(args)
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_plain_call() {
        let found = find_reference("Same as isEmpty(), if empty", 0).unwrap();
        assert_eq!(found.reference.simple_name, "isEmpty");
        assert_eq!(found.reference.signature, "isEmpty()");
        assert!(found.reference.arguments.is_empty());
        assert_eq!(found.reference.qualifier, None);
    }

    #[test]
    fn captures_qualifier_and_nested_arguments() {
        let found = find_reference("equivalent to Math.max(a, size(b, c))", 0).unwrap();
        assert_eq!(found.reference.qualifier.as_deref(), Some("Math"));
        assert_eq!(found.reference.simple_name, "max");
        assert_eq!(found.reference.arguments, vec!["a", "size(b, c)"]);
    }

    #[test]
    fn javadoc_hash_form_is_accepted() {
        let found = find_reference("same as #indexOf(o)", 0).unwrap();
        assert_eq!(found.reference.simple_name, "indexOf");
        assert_eq!(found.reference.arguments, vec!["o"]);
    }

    #[test]
    fn string_literals_keep_commas_and_parens() {
        let found = find_reference(r#"like split(",)", 2)"#, 0).unwrap();
        assert_eq!(found.reference.arguments, vec![r#"",)""#, "2"]);
    }

    #[test]
    fn skips_unbalanced_calls() {
        assert!(find_reference("same as foo(bar", 0).is_none());
        let found = find_reference("foo(bar and baz()", 0).unwrap();
        assert_eq!(found.reference.simple_name, "baz");
    }

    #[test]
    fn respects_start_offset() {
        let text = "size() is the same as length()";
        let found = find_reference(text, 7).unwrap();
        assert_eq!(found.reference.simple_name, "length");
    }

    #[test]
    fn splits_generic_arguments_at_top_level() {
        assert_eq!(
            split_arguments("new HashMap<K, V>(), 3"),
            vec!["new HashMap<K, V>()", "3"]
        );
        assert_eq!(split_arguments("a > b, c"), vec!["a > b", "c"]);
        assert_eq!(split_arguments("x -> f(x), y"), vec!["x -> f(x)", "y"]);
        assert_eq!(split_arguments("a<b, c"), vec!["a<b", "c"]);
        assert_eq!(
            split_arguments("Map<String, List<Integer>> m, i >= 0"),
            vec!["Map<String, List<Integer>> m", "i >= 0"]
        );
        assert!(split_arguments("  ").is_empty());
    }
}

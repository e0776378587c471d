//! Type names as they appear in signatures.
//!
//! Type identity is textual. Package qualifiers and generic arguments are
//! ignored when comparing names, so `java.util.List<E>` and `List` denote the
//! same type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Primitive-like types whose results are compared with `==`.
pub const PRIMITIVE_TYPES: &[&str] = &[
    "boolean", "byte", "char", "short", "int", "long", "float", "double",
];

const BOXED_TYPES: &[(&str, &str)] = &[
    ("boolean", "Boolean"),
    ("byte", "Byte"),
    ("char", "Character"),
    ("short", "Short"),
    ("int", "Integer"),
    ("long", "Long"),
    ("float", "Float"),
    ("double", "Double"),
];

/// A textual type name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name without package qualifier or generic arguments (`java.util.List<E>` -> `List`)
    pub fn simple_name(&self) -> &str {
        let erased = self.erased();
        let base = erased.trim_end_matches("[]");
        let start = base.rfind(['.', '$']).map_or(0, |i| i + 1);
        &erased[start..]
    }

    /// Name with generic arguments removed.
    ///
    /// Array brackets that follow a generic block (`List<E>[]`) are dropped too.
    pub fn erased(&self) -> &str {
        match self.0.find('<') {
            Some(open) => &self.0[..open],
            None => &self.0,
        }
    }

    /// Two names denote the same type once qualifiers and generics are dropped
    pub fn same_type(&self, other: &TypeName) -> bool {
        self.simple_name() == other.simple_name()
    }

    pub fn is_void(&self) -> bool {
        self.0 == "void"
    }

    pub fn is_primitive(&self) -> bool {
        PRIMITIVE_TYPES.contains(&self.0.as_str())
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self.simple_name(), "boolean" | "Boolean")
    }

    pub fn is_numeric_primitive(&self) -> bool {
        self.is_primitive() && self.0 != "boolean"
    }

    pub fn is_array(&self) -> bool {
        self.0.ends_with("[]")
    }

    /// Reference types are everything that is neither primitive nor void
    pub fn is_reference(&self) -> bool {
        !self.is_primitive() && !self.is_void()
    }

    /// Generic type variables such as `E`, `T` or `K2`
    pub fn is_type_variable(&self) -> bool {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) if first.is_ascii_uppercase() => {
                name.len() <= 2 && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
            }
            _ => false,
        }
    }

    /// The primitive a boxed type unboxes to (`Integer` -> `int`)
    pub fn unboxed(&self) -> Option<TypeName> {
        let simple = self.simple_name();
        BOXED_TYPES
            .iter()
            .find(|(_, boxed)| *boxed == simple)
            .map(|(primitive, _)| TypeName::new(*primitive))
    }

    /// The wrapper a primitive boxes to (`int` -> `Integer`)
    pub fn boxed(&self) -> Option<TypeName> {
        BOXED_TYPES
            .iter()
            .find(|(primitive, _)| *primitive == self.0)
            .map(|(_, boxed)| TypeName::new(*boxed))
    }

    /// Primitive view of this type: itself when primitive, its unboxed form when a wrapper
    pub fn as_primitive(&self) -> Option<TypeName> {
        if self.is_primitive() {
            Some(self.clone())
        } else {
            self.unboxed()
        }
    }

    /// `java.lang.Object`, the top of the reference hierarchy
    pub fn is_object(&self) -> bool {
        self.simple_name() == "Object"
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TypeName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&TypeName> for TypeName {
    fn from(value: &TypeName) -> Self {
        value.clone()
    }
}

//! Documented members: the executables whose comments are analyzed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::types::TypeName;

/// Kind of an executable member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutableKind {
    /// Regular method
    Method,
    /// Constructor; its result is a fresh instance of the declaring type
    Constructor,
}

/// A formal parameter of a documented member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name as written in the signature
    pub name: String,
    /// Declared parameter type
    #[serde(rename = "type")]
    pub type_name: TypeName,
}

impl Parameter {
    /// Create a new parameter
    pub fn new(name: impl Into<String>, type_name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// Raw natural-language text attached to a documented member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FreeTextComment {
    text: String,
}

impl FreeTextComment {
    /// Wrap comment text
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The comment text
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// An executable being documented, together with its comment.
///
/// Immutable once built; the analysis session owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentedMember {
    declaring_type: TypeName,
    name: String,
    kind: ExecutableKind,
    parameters: Vec<Parameter>,
    return_type: TypeName,
    is_static: bool,
    comment: Option<FreeTextComment>,
}

impl DocumentedMember {
    /// Create a method member with no parameters and no comment
    pub fn method(
        declaring_type: impl Into<TypeName>,
        name: impl Into<String>,
        return_type: impl Into<TypeName>,
    ) -> Self {
        Self {
            declaring_type: declaring_type.into(),
            name: name.into(),
            kind: ExecutableKind::Method,
            parameters: Vec::new(),
            return_type: return_type.into(),
            is_static: false,
            comment: None,
        }
    }

    /// Create a constructor member; it returns its declaring type
    pub fn constructor(declaring_type: impl Into<TypeName>) -> Self {
        let declaring_type = declaring_type.into();
        Self {
            name: declaring_type.simple_name().to_string(),
            return_type: declaring_type.clone(),
            declaring_type,
            kind: ExecutableKind::Constructor,
            parameters: Vec::new(),
            is_static: false,
            comment: None,
        }
    }

    /// Append a parameter
    pub fn with_parameter(mut self, name: impl Into<String>, type_name: impl Into<TypeName>) -> Self {
        self.parameters.push(Parameter::new(name, type_name));
        self
    }

    /// Replace the parameter list
    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Mark the member as static
    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    /// Attach the free-text comment
    pub fn with_comment(mut self, text: impl Into<String>) -> Self {
        self.comment = Some(FreeTextComment::new(text));
        self
    }

    pub fn declaring_type(&self) -> &TypeName {
        &self.declaring_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ExecutableKind {
        self.kind
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn return_type(&self) -> &TypeName {
        &self.return_type
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn comment(&self) -> Option<&FreeTextComment> {
        self.comment.as_ref()
    }

    /// Position of the parameter called `name`, if any
    pub fn parameter_index(&self, name: &str) -> Option<usize> {
        self.parameters.iter().position(|p| p.name == name)
    }

    /// Parameter types in declaration order
    pub fn parameter_types(&self) -> Vec<&TypeName> {
        self.parameters.iter().map(|p| &p.type_name).collect()
    }

    /// `Type#name(T1, T2)` form used in reports and selectors
    pub fn signature(&self) -> String {
        let params = self
            .parameters
            .iter()
            .map(|p| p.type_name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}#{}({})", self.declaring_type, self.name, params)
    }
}

impl fmt::Display for DocumentedMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.signature())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_lists_parameter_types() {
        let member = DocumentedMember::method("java.util.List", "indexOf", "int")
            .with_parameter("o", "java.lang.Object");
        assert_eq!(member.signature(), "java.util.List#indexOf(java.lang.Object)");
        assert_eq!(member.parameter_index("o"), Some(0));
        assert_eq!(member.parameter_index("x"), None);
    }

    #[test]
    fn constructor_returns_declaring_type() {
        let ctor = DocumentedMember::constructor("java.util.ArrayList")
            .with_parameter("initialCapacity", "int");
        assert_eq!(ctor.name(), "ArrayList");
        assert_eq!(ctor.return_type().as_str(), "java.util.ArrayList");
        assert_eq!(ctor.kind(), ExecutableKind::Constructor);
    }
}

//! Candidate code elements discovered on a documented member's declaring type.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::types::TypeName;

/// What kind of member a candidate is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Method,
    Constructor,
    Field,
}

/// A reflected candidate eligible to be an equivalence target.
///
/// Read-only during matching; identity is (kind, name, parameter types,
/// declaring type).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodeElement {
    kind: ElementKind,
    name: String,
    parameter_types: Vec<TypeName>,
    declaring_type: TypeName,
    return_type: TypeName,
    is_static: bool,
}

impl CodeElement {
    /// Instance method with no parameters
    pub fn method(
        declaring_type: impl Into<TypeName>,
        name: impl Into<String>,
        return_type: impl Into<TypeName>,
    ) -> Self {
        Self {
            kind: ElementKind::Method,
            name: name.into(),
            parameter_types: Vec::new(),
            declaring_type: declaring_type.into(),
            return_type: return_type.into(),
            is_static: false,
        }
    }

    /// Constructor of `declaring_type`
    pub fn constructor(declaring_type: impl Into<TypeName>) -> Self {
        let declaring_type: TypeName = declaring_type.into();
        Self {
            kind: ElementKind::Constructor,
            name: declaring_type.simple_name().to_string(),
            parameter_types: Vec::new(),
            return_type: declaring_type.clone(),
            declaring_type,
            is_static: true,
        }
    }

    /// Field of type `field_type`
    pub fn field(
        declaring_type: impl Into<TypeName>,
        name: impl Into<String>,
        field_type: impl Into<TypeName>,
    ) -> Self {
        Self {
            kind: ElementKind::Field,
            name: name.into(),
            parameter_types: Vec::new(),
            declaring_type: declaring_type.into(),
            return_type: field_type.into(),
            is_static: false,
        }
    }

    pub fn with_parameter(mut self, type_name: impl Into<TypeName>) -> Self {
        self.parameter_types.push(type_name.into());
        self
    }

    pub fn with_parameters(mut self, parameter_types: Vec<TypeName>) -> Self {
        self.parameter_types = parameter_types;
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameter_types(&self) -> &[TypeName] {
        &self.parameter_types
    }

    pub fn arity(&self) -> usize {
        self.parameter_types.len()
    }

    pub fn declaring_type(&self) -> &TypeName {
        &self.declaring_type
    }

    /// Type of the value the element produces (field type for fields)
    pub fn return_type(&self) -> &TypeName {
        &self.return_type
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Key used to collapse overrides: the same element declared again on a supertype
    pub fn override_key(&self) -> (ElementKind, &str, Vec<&str>) {
        (
            self.kind,
            self.name.as_str(),
            self.parameter_types
                .iter()
                .map(TypeName::simple_name)
                .collect(),
        )
    }
}

impl fmt::Display for CodeElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ElementKind::Field => write!(f, "{}#{}", self.declaring_type, self.name),
            _ => {
                let params = self
                    .parameter_types
                    .iter()
                    .map(TypeName::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{}#{}({})", self.declaring_type, self.name, params)
            }
        }
    }
}

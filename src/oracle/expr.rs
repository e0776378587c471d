//! Tagged oracle expressions and their structural type check.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::code_element::{CodeElement, ElementKind};
use crate::model::member::DocumentedMember;

/// Equality semantics applied to the documented member's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EqualityOperator {
    /// `RESULT==base`, for primitive-like results
    Identity,
    /// `RESULT.equals(base)`, for reference results
    Equals,
}

/// An oracle before rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OracleExpr {
    /// `result` compared with the (optionally negated) base expression
    Equality {
        result: String,
        operator: EqualityOperator,
        negated: bool,
        base: String,
    },
    /// `if (guard) {body}`
    Guarded { guard: String, body: Box<OracleExpr> },
}

impl OracleExpr {
    pub fn equality(
        result: impl Into<String>,
        operator: EqualityOperator,
        negated: bool,
        base: impl Into<String>,
    ) -> Self {
        Self::Equality {
            result: result.into(),
            operator,
            negated,
            base: base.into(),
        }
    }

    /// Wrap in a guard; blank guards leave the expression unchanged
    pub fn guarded(self, guard: &str) -> Self {
        let guard = guard.trim();
        if guard.is_empty() {
            self
        } else {
            Self::Guarded {
                guard: guard.to_string(),
                body: Box::new(self),
            }
        }
    }

    pub fn guard(&self) -> Option<&str> {
        match self {
            Self::Guarded { guard, .. } => Some(guard),
            Self::Equality { .. } => None,
        }
    }

    /// The innermost equality
    pub fn equality_part(&self) -> &OracleExpr {
        match self {
            Self::Guarded { body, .. } => body.equality_part(),
            equality => equality,
        }
    }

    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Check the expression against the documented member and the matched candidate.
    pub fn check(
        &self,
        member: &DocumentedMember,
        candidate: &CodeElement,
        receiver: Option<&str>,
    ) -> Result<(), StructuralError> {
        let Self::Equality {
            operator, negated, ..
        } = self.equality_part()
        else {
            return Err(StructuralError::MissingEquality);
        };

        let result_type = member.return_type();
        let base_type = candidate.return_type();

        if result_type.is_void() {
            return Err(StructuralError::VoidResult(member.signature()));
        }
        if base_type.is_void() {
            return Err(StructuralError::VoidCandidate(candidate.to_string()));
        }
        if *negated && !base_type.is_boolean() {
            return Err(StructuralError::NegatedNonBoolean(base_type.to_string()));
        }
        if *operator == EqualityOperator::Identity {
            let compatible = match base_type.as_primitive() {
                Some(base) => base.is_boolean() == result_type.is_boolean(),
                None => false,
            };
            if !compatible {
                return Err(StructuralError::IncomparableTypes {
                    result: result_type.to_string(),
                    base: base_type.to_string(),
                });
            }
        }
        let needs_receiver = matches!(candidate.kind(), ElementKind::Method | ElementKind::Field)
            && !candidate.is_static();
        if member.is_static() && needs_receiver && receiver.is_none() {
            return Err(StructuralError::MissingReceiver(candidate.to_string()));
        }
        Ok(())
    }
}

impl fmt::Display for OracleExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equality {
                result,
                operator,
                negated,
                base,
            } => {
                let not = if *negated { "!" } else { "" };
                match operator {
                    EqualityOperator::Identity => write!(f, "{}=={}{}", result, not, base),
                    EqualityOperator::Equals => write!(f, "{}.equals({}{})", result, not, base),
                }
            }
            Self::Guarded { guard, body } => write!(f, "if ({}) {{{}}}", guard, body),
        }
    }
}

/// Reasons a synthesized oracle cannot type-check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("oracle has no equality")]
    MissingEquality,
    #[error("{0} returns void")]
    VoidResult(String),
    #[error("candidate {0} returns void")]
    VoidCandidate(String),
    #[error("cannot negate a {0} expression")]
    NegatedNonBoolean(String),
    #[error("cannot compare {result} result with {base} using ==")]
    IncomparableTypes { result: String, base: String },
    #[error("instance member {0} referenced from a static context")]
    MissingReceiver(String),
}

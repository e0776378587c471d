//! Argument-to-parameter type compatibility.
//!
//! Compatibility is a distance: 0 for an exact match, growing with each
//! widening, boxing or supertype hop. Any pure widening stays below a boxing
//! conversion. `None` means incompatible.

use crate::model::types::TypeName;

/// Distance for passing a `null` literal to any reference parameter
pub const NULL_DISTANCE: u32 = 1;
/// Distance for boxing or unboxing; above any pure widening chain
pub const BOXING_DISTANCE: u32 = 6;
/// Distance for binding a reference to a generic type variable
pub const TYPE_VARIABLE_DISTANCE: u32 = 6;
/// Distance for an argument whose type could not be inferred
pub const UNKNOWN_DISTANCE: u32 = 7;
/// Distance for passing any reference as `Object`
pub const OBJECT_DISTANCE: u32 = 8;

/// Statically inferred type of an argument expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentType {
    /// The type is known
    Known(TypeName),
    /// The `null` literal
    Null,
    /// Nothing could be inferred
    Unknown,
}

/// Answers reference subtyping questions; implemented by type catalogs.
pub trait TypeHierarchy {
    /// Number of supertype hops from `sub` to `sup`, if `sub` is a subtype of `sup`
    fn supertype_distance(&self, sub: &TypeName, sup: &TypeName) -> Option<u32>;
}

/// Hierarchy that knows no subtyping beyond identity.
#[derive(Debug, Default, Clone, Copy)]
pub struct FlatHierarchy;

impl TypeHierarchy for FlatHierarchy {
    fn supertype_distance(&self, _sub: &TypeName, _sup: &TypeName) -> Option<u32> {
        None
    }
}

// Widening order; each step right is one unit of distance.
const NUMERIC_CHAIN: &[&str] = &["byte", "short", "int", "long", "float", "double"];

/// Steps of primitive widening from `from` to `to`, if allowed.
pub fn widening_distance(from: &str, to: &str) -> Option<u32> {
    if from == to {
        return Some(0);
    }
    // char widens to int and beyond, nothing else widens to char
    let (from, bonus) = if from == "char" { ("int", 1) } else { (from, 0) };
    if to == "char" || from == "boolean" || to == "boolean" {
        return None;
    }
    let from_pos = NUMERIC_CHAIN.iter().position(|t| *t == from)?;
    let to_pos = NUMERIC_CHAIN.iter().position(|t| *t == to)?;
    (to_pos >= from_pos).then(|| (to_pos - from_pos) as u32 + bonus)
}

/// Distance for passing an argument of type `arg` to a parameter of type `param`.
pub fn argument_distance(
    arg: &ArgumentType,
    param: &TypeName,
    hierarchy: &dyn TypeHierarchy,
) -> Option<u32> {
    match arg {
        ArgumentType::Unknown => Some(UNKNOWN_DISTANCE),
        ArgumentType::Null => param.is_reference().then_some(NULL_DISTANCE),
        ArgumentType::Known(arg) => known_distance(arg, param, hierarchy),
    }
}

fn known_distance(arg: &TypeName, param: &TypeName, hierarchy: &dyn TypeHierarchy) -> Option<u32> {
    if arg.same_type(param) {
        return Some(0);
    }

    match (arg.is_primitive(), param.is_primitive()) {
        (true, true) => widening_distance(arg.as_str(), param.as_str()),
        (true, false) => {
            // boxing, then one more hop when the wrapper binds to a supertype
            let boxed = arg.boxed()?;
            if boxed.same_type(param) {
                Some(BOXING_DISTANCE)
            } else if param.is_type_variable() {
                Some(TYPE_VARIABLE_DISTANCE.max(BOXING_DISTANCE) + 1)
            } else if param.is_object() || matches!(param.simple_name(), "Number" | "Comparable") {
                Some(OBJECT_DISTANCE.max(BOXING_DISTANCE) + 1)
            } else {
                None
            }
        }
        (false, true) => {
            let unboxed = arg.unboxed()?;
            widening_distance(unboxed.as_str(), param.as_str()).map(|d| d + BOXING_DISTANCE)
        }
        (false, false) => {
            if let Some(hops) = hierarchy.supertype_distance(arg, param) {
                Some(hops)
            } else if param.is_type_variable() {
                Some(TYPE_VARIABLE_DISTANCE)
            } else if param.is_object() {
                Some(OBJECT_DISTANCE)
            } else if arg.is_type_variable() {
                Some(UNKNOWN_DISTANCE)
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known(t: &str) -> ArgumentType {
        ArgumentType::Known(TypeName::new(t))
    }

    fn distance(arg: ArgumentType, param: &str) -> Option<u32> {
        argument_distance(&arg, &TypeName::new(param), &FlatHierarchy)
    }

    #[test]
    fn exact_types_have_zero_distance() {
        assert_eq!(distance(known("int"), "int"), Some(0));
        assert_eq!(distance(known("java.lang.String"), "String"), Some(0));
    }

    #[test]
    fn primitive_widening_counts_steps() {
        assert_eq!(widening_distance("int", "long"), Some(1));
        assert_eq!(widening_distance("byte", "double"), Some(5));
        assert_eq!(widening_distance("char", "int"), Some(1));
        assert_eq!(widening_distance("char", "long"), Some(2));
        assert_eq!(widening_distance("long", "int"), None);
        assert_eq!(widening_distance("short", "char"), None);
        assert_eq!(widening_distance("boolean", "int"), None);
    }

    #[test]
    fn boxing_costs_more_than_widening() {
        let longest_widening = widening_distance("byte", "double").unwrap();
        assert!(longest_widening < BOXING_DISTANCE);
        assert!(widening_distance("char", "double").unwrap() < BOXING_DISTANCE);
        assert_eq!(distance(known("int"), "Integer"), Some(BOXING_DISTANCE));
        assert_eq!(distance(known("int"), "Object"), Some(OBJECT_DISTANCE + 1));
        assert_eq!(distance(known("Integer"), "long"), Some(1 + BOXING_DISTANCE));
        assert_eq!(distance(known("int"), "String"), None);
    }

    #[test]
    fn references_bind_to_object_and_type_variables() {
        assert_eq!(distance(known("String"), "Object"), Some(OBJECT_DISTANCE));
        assert_eq!(distance(known("String"), "E"), Some(TYPE_VARIABLE_DISTANCE));
        assert_eq!(distance(known("String"), "Integer"), None);
    }

    #[test]
    fn null_binds_only_to_references() {
        assert_eq!(distance(ArgumentType::Null, "String"), Some(NULL_DISTANCE));
        assert_eq!(distance(ArgumentType::Null, "int"), None);
    }

    #[test]
    fn unknown_arguments_are_weakly_compatible() {
        assert_eq!(distance(ArgumentType::Unknown, "int"), Some(UNKNOWN_DISTANCE));
    }

    struct ListHierarchy;

    impl TypeHierarchy for ListHierarchy {
        fn supertype_distance(&self, sub: &TypeName, sup: &TypeName) -> Option<u32> {
            (sub.simple_name() == "ArrayList" && sup.simple_name() == "List").then_some(1)
        }
    }

    #[test]
    fn hierarchy_supplies_subtype_hops() {
        let d = argument_distance(&known("ArrayList"), &TypeName::new("List"), &ListHierarchy);
        assert_eq!(d, Some(1));
    }
}

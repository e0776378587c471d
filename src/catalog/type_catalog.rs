//! Declarative type catalog: the shipped candidate enumerator.
//!
//! A catalog lists types with their supertypes and members, in YAML or JSON:
//!
//! ```yaml
//! types:
//!   - name: java.util.ArrayList
//!     supertypes: [java.util.List]
//!     members:
//!       - kind: method
//!         name: isEmptyList
//!         return_type: boolean
//!         comment: Returns the same as isEmpty(), if the list has no elements.
//! ```

use std::collections::{HashSet, VecDeque};
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::enumerator::CandidateEnumerator;
use crate::core::errors::{DocOracleError, Result};
use crate::matching::types::TypeHierarchy;
use crate::model::code_element::{CodeElement, ElementKind};
use crate::model::member::{DocumentedMember, ExecutableKind, Parameter};
use crate::model::types::TypeName;

/// Member kinds accepted in catalog files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Method,
    Constructor,
    Field,
}

/// One member entry as written in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberEntry {
    pub kind: MemberKind,
    /// Member name; constructors default to the type's simple name
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Return type for methods (default `void`), field type for fields
    #[serde(default)]
    pub return_type: Option<TypeName>,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// One type entry as written in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeEntry {
    pub name: TypeName,
    /// Direct supertypes, nearest first
    #[serde(default)]
    pub supertypes: Vec<TypeName>,
    #[serde(default)]
    pub members: Vec<MemberEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    types: Vec<TypeEntry>,
}

type OverrideKey = (ElementKind, String, Vec<String>);

/// Types indexed by name, in file order.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    types: IndexMap<String, TypeEntry>,
}

impl TypeCatalog {
    /// Build a catalog, rejecting duplicate types and malformed members
    pub fn new(types: Vec<TypeEntry>) -> Result<Self> {
        let mut indexed = IndexMap::with_capacity(types.len());
        for entry in types {
            validate_entry(&entry)?;
            let key = entry.name.erased().to_string();
            if indexed.contains_key(&key) {
                return Err(DocOracleError::catalog_type("duplicate type", key));
            }
            indexed.insert(key, entry);
        }
        Ok(Self { types: indexed })
    }

    /// Load a catalog file; `.json` files are read as JSON, everything else as YAML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DocOracleError::io(format!("Failed to read catalog: {}", path.display()), e)
        })?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = serde_yaml::from_str(content)?;
        Self::new(file.types)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(content)?;
        Self::new(file.types)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeEntry> {
        self.types.values()
    }

    /// Entry for `name`, by qualified name first and simple name second
    pub fn lookup(&self, name: &TypeName) -> Option<&TypeEntry> {
        self.types
            .get(name.erased())
            .or_else(|| self.types.values().find(|t| t.name.same_type(name)))
    }

    /// Every commented method and constructor, in catalog order
    pub fn documented_members(&self) -> Vec<DocumentedMember> {
        self.types
            .values()
            .flat_map(|t| t.members.iter().filter_map(move |m| to_documented(t, m)))
            .filter(|m| m.comment().is_some())
            .collect()
    }

    /// Resolve `Type#name` or `Type#name(T1, T2)` to a documented member.
    ///
    /// Without a parameter list the first overload in declaration order is used.
    pub fn find_member(&self, selector: &str) -> Result<DocumentedMember> {
        let (type_part, member_part) = selector
            .split_once('#')
            .ok_or_else(|| DocOracleError::parse("member selector needs 'Type#name'", selector))?;
        let (name, params) = match member_part.split_once('(') {
            Some((name, rest)) => {
                let inner = rest
                    .strip_suffix(')')
                    .ok_or_else(|| DocOracleError::parse("unclosed parameter list", selector))?;
                let params: Vec<TypeName> = inner
                    .split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(TypeName::new)
                    .collect();
                (name.trim(), Some(params))
            }
            None => (member_part.trim(), None),
        };

        let entry = self
            .lookup(&TypeName::new(type_part))
            .ok_or_else(|| DocOracleError::catalog_type("unknown type", type_part))?;

        entry
            .members
            .iter()
            .filter_map(|m| to_documented(entry, m))
            .find(|m| {
                m.name() == name
                    && params.as_ref().map_or(true, |p| {
                        p.len() == m.parameters().len()
                            && p.iter().zip(m.parameter_types()).all(|(a, b)| a.same_type(b))
                    })
            })
            .ok_or_else(|| {
                DocOracleError::catalog_type(format!("no member matching '{}'", member_part), type_part)
            })
    }

    /// Known types reachable from `start`, breadth-first with their hop count
    fn ancestry(&self, start: &TypeName) -> Vec<(&TypeEntry, u32)> {
        let mut out = Vec::new();
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        queue.push_back((start.clone(), 0u32));

        while let Some((name, depth)) = queue.pop_front() {
            let Some(entry) = self.lookup(&name) else {
                continue;
            };
            if visited.insert(entry.name.erased()) {
                for sup in &entry.supertypes {
                    queue.push_back((sup.clone(), depth + 1));
                }
                out.push((entry, depth));
            }
        }
        out
    }
}

impl CandidateEnumerator for TypeCatalog {
    fn enumerate(&self, member: &DocumentedMember) -> Result<Vec<CodeElement>> {
        if self.lookup(member.declaring_type()).is_none() {
            return Err(DocOracleError::catalog_type(
                "declaring type is not in the catalog",
                member.declaring_type().as_str(),
            ));
        }

        let own_kind = match member.kind() {
            ExecutableKind::Method => ElementKind::Method,
            ExecutableKind::Constructor => ElementKind::Constructor,
        };
        let mut seen: HashSet<OverrideKey> = HashSet::new();
        // the member itself and the declarations it overrides are never candidates
        seen.insert((
            own_kind,
            member.name().to_string(),
            member
                .parameter_types()
                .iter()
                .map(|t| t.simple_name().to_string())
                .collect(),
        ));

        let mut candidates = Vec::new();
        for (entry, depth) in self.ancestry(member.declaring_type()) {
            for m in &entry.members {
                // constructors are not inherited
                if depth > 0 && m.kind == MemberKind::Constructor {
                    continue;
                }
                let element = to_element(entry, m);
                let (kind, name, params) = element.override_key();
                let key = (
                    kind,
                    name.to_string(),
                    params.into_iter().map(str::to_string).collect(),
                );
                if seen.insert(key) {
                    candidates.push(element);
                }
            }
        }
        debug!(
            member = %member,
            candidates = candidates.len(),
            "enumerated catalog candidates"
        );
        Ok(candidates)
    }

    fn hierarchy(&self) -> &dyn TypeHierarchy {
        self
    }
}

impl TypeHierarchy for TypeCatalog {
    fn supertype_distance(&self, sub: &TypeName, sup: &TypeName) -> Option<u32> {
        if let Some(depth) = self
            .ancestry(sub)
            .into_iter()
            .find(|(entry, _)| entry.name.same_type(sup))
            .map(|(_, depth)| depth)
        {
            return Some(depth);
        }
        // supertypes named in the catalog without an entry of their own
        self.ancestry(sub).into_iter().find_map(|(entry, depth)| {
            entry
                .supertypes
                .iter()
                .any(|s| s.same_type(sup))
                .then_some(depth + 1)
        })
    }
}

fn validate_entry(entry: &TypeEntry) -> Result<()> {
    if entry.name.as_str().is_empty() {
        return Err(DocOracleError::catalog("type entry without a name"));
    }
    for member in &entry.members {
        match member.kind {
            MemberKind::Method | MemberKind::Field if member.name.is_none() => {
                return Err(DocOracleError::catalog_type(
                    "method and field entries need a name",
                    entry.name.as_str(),
                ));
            }
            MemberKind::Field if member.return_type.is_none() => {
                return Err(DocOracleError::catalog_type(
                    format!(
                        "field '{}' needs a return_type",
                        member.name.as_deref().unwrap_or_default()
                    ),
                    entry.name.as_str(),
                ));
            }
            _ => {}
        }
    }
    Ok(())
}

fn member_name(entry: &TypeEntry, member: &MemberEntry) -> String {
    member
        .name
        .clone()
        .unwrap_or_else(|| entry.name.simple_name().to_string())
}

fn return_type(member: &MemberEntry) -> TypeName {
    member
        .return_type
        .clone()
        .unwrap_or_else(|| TypeName::new("void"))
}

fn to_documented(entry: &TypeEntry, member: &MemberEntry) -> Option<DocumentedMember> {
    let documented = match member.kind {
        MemberKind::Field => return None,
        MemberKind::Constructor => DocumentedMember::constructor(entry.name.clone()),
        MemberKind::Method => DocumentedMember::method(
            entry.name.clone(),
            member_name(entry, member),
            return_type(member),
        ),
    }
    .with_parameters(member.parameters.clone())
    .with_static(member.is_static);

    Some(match &member.comment {
        Some(comment) => documented.with_comment(comment.clone()),
        None => documented,
    })
}

fn to_element(entry: &TypeEntry, member: &MemberEntry) -> CodeElement {
    let parameter_types = member
        .parameters
        .iter()
        .map(|p| p.type_name.clone())
        .collect();
    match member.kind {
        MemberKind::Constructor => CodeElement::constructor(entry.name.clone()),
        MemberKind::Field => {
            CodeElement::field(entry.name.clone(), member_name(entry, member), return_type(member))
                .with_static(member.is_static)
        }
        MemberKind::Method => CodeElement::method(
            entry.name.clone(),
            member_name(entry, member),
            return_type(member),
        )
        .with_static(member.is_static),
    }
    .with_parameters(parameter_types)
}

#[cfg(test)]
#[path = "type_catalog_tests.rs"]
mod tests;

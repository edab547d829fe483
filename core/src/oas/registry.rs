#![deny(missing_docs)]

//! # Type Registry
//!
//! Insertion-ordered store of every synthesized type definition, keyed by name.
//!
//! The registry is the sole answer to "was a type produced for this slot":
//! callers query [`TypeRegistry::contains`] rather than inspecting values.

use crate::oas::models::{AliasMember, FieldRecord, TypeDefinition, TypeRef};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashSet;

/// Name-keyed arena of type definitions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TypeRegistry {
    types: IndexMap<String, TypeDefinition>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `definition` under `name`.
    ///
    /// Re-registering an existing name replaces the definition but keeps the
    /// name's original position.
    pub fn insert(&mut self, name: impl Into<String>, definition: TypeDefinition) {
        let name = name.into();
        match self.types.get_mut(&name) {
            Some(existing) => {
                if *existing != definition {
                    tracing::trace!(%name, "replacing type definition");
                }
                *existing = definition;
            }
            None => {
                tracing::debug!(%name, "registered type");
                self.types.insert(name, definition);
            }
        }
    }

    /// Whether a definition exists under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Looks up a definition.
    pub fn get(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// True when nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// `(name, definition)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeDefinition)> {
        self.types.iter().map(|(name, def)| (name.as_str(), def))
    }

    /// The fields a value of type `name` structurally has.
    ///
    /// Records contribute their own fields, composites the fields of every
    /// included type, and a single-member alias the fields of its member.
    /// Unknown names and other shapes contribute nothing.
    pub fn effective_fields(&self, name: &str) -> Vec<&FieldRecord> {
        let mut fields = Vec::new();
        let mut visited = HashSet::new();
        self.collect_fields(name, &mut visited, &mut fields);
        fields
    }

    fn collect_fields<'a>(
        &'a self,
        name: &str,
        visited: &mut HashSet<String>,
        out: &mut Vec<&'a FieldRecord>,
    ) {
        if !visited.insert(name.to_string()) {
            return;
        }
        match self.types.get(name) {
            Some(TypeDefinition::Record { fields }) => out.extend(fields.iter()),
            Some(TypeDefinition::Composite { includes }) => {
                for include in includes {
                    if let Some(inner) = include.as_named() {
                        self.collect_fields(inner, visited, out);
                    }
                }
            }
            Some(TypeDefinition::Alias { members, .. }) => {
                if let [AliasMember::Type(TypeRef::Named(inner))] = members.as_slice() {
                    self.collect_fields(inner, visited, out);
                }
            }
            None => {}
        }
    }

    /// Whether every field of `name` is optional.
    ///
    /// A type with no known fields is not considered all-optional, so slots
    /// bound to it stay required.
    pub fn is_all_optional(&self, name: &str) -> bool {
        let fields = self.effective_fields(name);
        !fields.is_empty() && fields.iter().all(|f| !f.required)
    }

    /// Named references used anywhere in the registry that have no definition
    /// and are not listed in `external`.
    ///
    /// Each dangling name is reported once, in order of first use.
    pub fn dangling_references(&self, external: &[&str]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut dangling = Vec::new();

        let mut check = |ty: &TypeRef| {
            if let Some(name) = ty.innermost_named() {
                if !self.contains(name) && !external.contains(&name) && seen.insert(name.to_string())
                {
                    dangling.push(name.to_string());
                }
            }
        };

        for definition in self.types.values() {
            match definition {
                TypeDefinition::Record { fields } => fields.iter().for_each(|f| check(&f.ty)),
                TypeDefinition::Composite { includes } => includes.iter().for_each(&mut check),
                TypeDefinition::Alias { members, .. } => {
                    for member in members {
                        if let AliasMember::Type(ty) = member {
                            check(ty);
                        }
                    }
                }
            }
        }

        for name in &dangling {
            tracing::warn!(%name, "reference to a type that was never defined");
        }
        dangling
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, required: bool) -> FieldRecord {
        FieldRecord {
            field: name.to_string(),
            ty: TypeRef::String,
            required,
            nullable: false,
            description: String::new(),
        }
    }

    fn record(fields: Vec<FieldRecord>) -> TypeDefinition {
        TypeDefinition::Record { fields }
    }

    #[test]
    fn test_insert_keeps_position_on_replace() {
        let mut reg = TypeRegistry::new();
        reg.insert("A", record(vec![field("a", true)]));
        reg.insert("B", record(vec![]));
        reg.insert("A", record(vec![field("z", false)]));

        let names: Vec<&str> = reg.names().collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(reg.effective_fields("A")[0].field, "z");
    }

    #[test]
    fn test_contains_and_absence() {
        let mut reg = TypeRegistry::new();
        assert!(reg.is_empty());
        reg.insert("Pet", record(vec![]));
        assert!(reg.contains("Pet"));
        assert!(!reg.contains("PetQuery"));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_effective_fields_through_composite_and_alias() {
        let mut reg = TypeRegistry::new();
        reg.insert("X", record(vec![field("x", true)]));
        reg.insert("Y", record(vec![field("y", false)]));
        reg.insert(
            "XY",
            TypeDefinition::Composite {
                includes: vec![TypeRef::named("X"), TypeRef::named("Y")],
            },
        );
        reg.insert(
            "Body",
            TypeDefinition::Alias {
                members: vec![AliasMember::Type(TypeRef::named("XY"))],
                description: None,
            },
        );

        let names: Vec<&str> = reg
            .effective_fields("Body")
            .iter()
            .map(|f| f.field.as_str())
            .collect();
        assert_eq!(names, vec!["x", "y"]);
    }

    #[test]
    fn test_self_including_composite_terminates() {
        let mut reg = TypeRegistry::new();
        reg.insert(
            "Loop",
            TypeDefinition::Composite {
                includes: vec![TypeRef::named("Loop")],
            },
        );
        assert!(reg.effective_fields("Loop").is_empty());
    }

    #[test]
    fn test_is_all_optional() {
        let mut reg = TypeRegistry::new();
        reg.insert("Opt", record(vec![field("a", false), field("b", false)]));
        reg.insert("Req", record(vec![field("a", false), field("b", true)]));
        reg.insert("Empty", record(vec![]));
        reg.insert(
            "Primitive",
            TypeDefinition::Alias {
                members: vec![AliasMember::Type(TypeRef::String)],
                description: None,
            },
        );

        assert!(reg.is_all_optional("Opt"));
        assert!(!reg.is_all_optional("Req"));
        assert!(!reg.is_all_optional("Empty"));
        assert!(!reg.is_all_optional("Primitive"));
        assert!(!reg.is_all_optional("Missing"));
    }

    #[test]
    fn test_dangling_references() {
        let mut reg = TypeRegistry::new();
        reg.insert(
            "Pet",
            record(vec![
                FieldRecord {
                    ty: TypeRef::Array(Box::new(TypeRef::named("Tag"))),
                    ..field("tags", false)
                },
                FieldRecord {
                    ty: TypeRef::named("Date"),
                    ..field("born", false)
                },
                FieldRecord {
                    ty: TypeRef::named("Tag"),
                    ..field("main", false)
                },
            ]),
        );

        assert_eq!(reg.dangling_references(&["Date"]), vec!["Tag".to_string()]);

        reg.insert("Tag", record(vec![]));
        assert!(reg.dangling_references(&["Date"]).is_empty());
    }
}

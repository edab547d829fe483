#![deny(missing_docs)]

//! # Schema Resolver
//!
//! Recursive mapping of a schema node to a [`TypeRef`], registering a named
//! definition for every compound shape met on the way.
//!
//! Discriminators are checked in a fixed order, first match wins:
//! `allOf`, `anyOf`, `oneOf`, `$ref`, then `type`.

use crate::error::{AppError, AppResult};
use crate::oas::document::{Schema, SchemaType};
use crate::oas::models::{AliasMember, FieldRecord, TypeDefinition, TypeRef};
use crate::oas::naming::{synthesize, ALL_OF_SUFFIX, ITEM_SUFFIX, UNION_SUFFIX};
use crate::oas::options::DEFAULT_ISO_STRING_TYPE;
use crate::oas::registry::TypeRegistry;

/// Owns the registry while a document is being resolved.
#[derive(Debug)]
pub struct Resolver {
    registry: TypeRegistry,
    iso_string_type_name: String,
}

impl Resolver {
    /// Creates a resolver over an empty registry.
    pub fn new(iso_string_type_name: impl Into<String>) -> Self {
        Self {
            registry: TypeRegistry::new(),
            iso_string_type_name: iso_string_type_name.into(),
        }
    }

    /// Read access to the definitions registered so far.
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Registers a definition produced outside the recursive walk
    /// (parameter records, body aliases).
    pub fn register(&mut self, name: impl Into<String>, definition: TypeDefinition) {
        self.registry.insert(name, definition);
    }

    /// Finishes the pass and hands out the registry.
    pub fn into_registry(self) -> TypeRegistry {
        self.registry
    }

    /// Resolves `schema`, found at `field` inside the naming context `context`.
    pub fn resolve(&mut self, context: &str, field: &str, schema: &Schema) -> AppResult<TypeRef> {
        if let Some(branches) = &schema.all_of {
            let includes = self.resolve_branches(context, field, branches)?;
            let name = synthesize(context, field, None);
            self.registry
                .insert(name.clone(), TypeDefinition::Composite { includes });
            return Ok(TypeRef::Named(name));
        }

        if let Some(branches) = &schema.any_of {
            let includes = self.resolve_branches(context, field, branches)?;
            let name = synthesize(context, field, None);
            let all_of_name = synthesize(context, field, Some(ALL_OF_SUFFIX));

            let mut members: Vec<AliasMember> =
                includes.iter().cloned().map(AliasMember::Type).collect();
            members.push(AliasMember::Type(TypeRef::named(all_of_name.as_str())));

            self.registry
                .insert(all_of_name, TypeDefinition::Composite { includes });
            self.registry.insert(
                name.clone(),
                TypeDefinition::Alias {
                    members,
                    description: None,
                },
            );
            return Ok(TypeRef::Named(name));
        }

        if let Some(branches) = &schema.one_of {
            let members = self
                .resolve_branches(context, field, branches)?
                .into_iter()
                .map(AliasMember::Type)
                .collect();
            let name = synthesize(context, field, None);
            self.registry.insert(
                name.clone(),
                TypeDefinition::Alias {
                    members,
                    description: None,
                },
            );
            return Ok(TypeRef::Named(name));
        }

        if let Some(reference) = &schema.reference {
            let target = reference.rsplit('/').next().unwrap_or(reference);
            return Ok(TypeRef::named(target));
        }

        match schema.schema_type {
            Some(SchemaType::Boolean) => Ok(TypeRef::Boolean),
            Some(SchemaType::Number | SchemaType::Integer) => match &schema.enumeration {
                Some(values) => Ok(self.register_enum(context, field, values, schema)),
                None => Ok(TypeRef::Number),
            },
            Some(SchemaType::String) => {
                if let Some(values) = &schema.enumeration {
                    return Ok(self.register_enum(context, field, values, schema));
                }
                if schema.format.as_deref() == Some("date-time") {
                    return Ok(self.iso_string_type());
                }
                Ok(TypeRef::String)
            }
            Some(SchemaType::Array) => match &schema.items {
                Some(items) => {
                    let item_context = synthesize(context, field, Some(ITEM_SUFFIX));
                    let inner = self.resolve(&item_context, ITEM_SUFFIX, items)?;
                    Ok(TypeRef::Array(Box::new(inner)))
                }
                None => Ok(TypeRef::UntypedArray),
            },
            Some(SchemaType::Object) => match &schema.properties {
                Some(_) => Ok(TypeRef::Named(self.register_record(context, field, schema)?)),
                None => Ok(TypeRef::Object),
            },
            Some(SchemaType::Unknown) | None => Err(AppError::UnrecognizedSchema {
                context: context.to_string(),
                field: field.to_string(),
            }),
        }
    }

    /// Resolves the legal branches of a composition under the composition's
    /// own `(context, field)`.
    ///
    /// An inline compound branch shares the composition's name and is
    /// overwritten when the composition registers.
    fn resolve_branches(
        &mut self,
        context: &str,
        field: &str,
        branches: &[Schema],
    ) -> AppResult<Vec<TypeRef>> {
        branches
            .iter()
            .filter(|branch| branch.is_legal_branch())
            .map(|branch| self.resolve(context, field, branch))
            .collect()
    }

    fn register_enum(
        &mut self,
        context: &str,
        field: &str,
        values: &[serde_json::Value],
        schema: &Schema,
    ) -> TypeRef {
        let name = synthesize(context, field, Some(UNION_SUFFIX));
        self.registry.insert(
            name.clone(),
            TypeDefinition::Alias {
                members: values.iter().cloned().map(AliasMember::Literal).collect(),
                description: schema.description.clone(),
            },
        );
        TypeRef::Named(name)
    }

    fn register_record(&mut self, context: &str, field: &str, schema: &Schema) -> AppResult<String> {
        let name = synthesize(context, field, None);
        let properties = schema.properties.iter().flatten();

        let mut fields = Vec::new();
        for (property, property_schema) in properties {
            let (nullable, description) = if property_schema.is_structural() {
                (
                    property_schema.nullable,
                    property_schema.description.clone().unwrap_or_default(),
                )
            } else {
                (false, String::new())
            };

            fields.push(FieldRecord {
                field: property.clone(),
                ty: self.resolve(&name, property, property_schema)?,
                required: schema.required.contains(property),
                nullable,
                description,
            });
        }

        self.registry
            .insert(name.clone(), TypeDefinition::Record { fields });
        Ok(name)
    }

    /// An empty configured name falls back to the default `string`.
    fn iso_string_type(&self) -> TypeRef {
        let name = self.iso_string_type_name.as_str();
        if name.is_empty() || name == DEFAULT_ISO_STRING_TYPE {
            TypeRef::String
        } else {
            TypeRef::named(name)
        }
    }
}

#![deny(missing_docs)]

//! # Type Models
//!
//! Intermediate Representation produced by the resolver and consumed by an
//! emitter. Everything here is structured data; nothing is rendered.

use crate::oas::document::Method;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Reference to a type from a field, alias member or composite include.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// `string`
    String,
    /// `number` (also used for `integer`).
    Number,
    /// `boolean`
    Boolean,
    /// An object without declared properties.
    Object,
    /// An array without `items`; element type unknown.
    UntypedArray,
    /// An array of the inner type.
    Array(Box<TypeRef>),
    /// A named type, either in the registry or supplied externally
    /// (e.g. the configured ISO date type, or a dangling `$ref`).
    Named(String),
}

impl TypeRef {
    /// Shorthand for [`TypeRef::Named`].
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    /// The referenced type name, if this is a named reference.
    pub fn as_named(&self) -> Option<&str> {
        match self {
            TypeRef::Named(name) => Some(name),
            _ => None,
        }
    }

    /// The innermost named reference, looking through arrays.
    pub fn innermost_named(&self) -> Option<&str> {
        match self {
            TypeRef::Named(name) => Some(name),
            TypeRef::Array(inner) => inner.innermost_named(),
            _ => None,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::String => f.write_str("string"),
            TypeRef::Number => f.write_str("number"),
            TypeRef::Boolean => f.write_str("boolean"),
            TypeRef::Object => f.write_str("object"),
            TypeRef::UntypedArray => f.write_str("any[]"),
            TypeRef::Array(inner) => write!(f, "{}[]", inner),
            TypeRef::Named(name) => f.write_str(name),
        }
    }
}

impl Serialize for TypeRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// One field of a record type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldRecord {
    /// Property name as written in the document.
    pub field: String,
    /// Field type.
    #[serde(rename = "type")]
    pub ty: TypeRef,
    /// Whether the property is mandatory.
    pub required: bool,
    /// Whether `null` is accepted in addition to `ty`.
    pub nullable: bool,
    /// Description; empty when absent.
    pub description: String,
}

/// A member of an alias (union) type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AliasMember {
    /// Another type.
    Type(TypeRef),
    /// A literal value from an `enum` (string or number).
    Literal(Value),
}

/// A named, emittable shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDefinition {
    /// An object with an ordered list of fields.
    Record {
        /// Fields in property order.
        fields: Vec<FieldRecord>,
    },
    /// A union of types or literals.
    Alias {
        /// Members in document order.
        members: Vec<AliasMember>,
        /// Description carried from an `enum` schema.
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    /// An empty record structurally including the listed types (intersection).
    Composite {
        /// Included types in branch order.
        includes: Vec<TypeRef>,
    },
}

/// Type binding of an optional-or-required request slot (query, body).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestParam {
    /// Registry name of the slot's type.
    pub type_name: String,
    /// False only when every field of the type is optional.
    pub required: bool,
}

/// Binding of one `(path, method)` pair to its types.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationDescriptor {
    /// Path template as written in the document (not normalized).
    pub path: String,
    /// Operation function name (e.g. `petsByIdGet`).
    pub name: String,
    /// HTTP method.
    pub method: Method,
    /// Operation tags.
    pub tags: Vec<String>,
    /// Operation summary; empty when absent.
    pub description: String,
    /// Path parameter type name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    /// Query parameter type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<RequestParam>,
    /// Request body type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<RequestParam>,
    /// Success response type name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

impl OperationDescriptor {
    /// Registry names this operation binds, in `query`, `param`, `body`,
    /// `response` order.
    pub fn referenced_types(&self) -> Vec<&str> {
        [
            self.query.as_ref().map(|q| q.type_name.as_str()),
            self.param.as_deref(),
            self.body.as_ref().map(|b| b.type_name.as_str()),
            self.response.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// First tag, which decides the operation's group.
    pub fn group(&self) -> &str {
        self.tags.first().map(String::as_str).unwrap_or("default")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_ref_display() {
        assert_eq!(TypeRef::String.to_string(), "string");
        assert_eq!(TypeRef::UntypedArray.to_string(), "any[]");
        let nested = TypeRef::Array(Box::new(TypeRef::Array(Box::new(TypeRef::named("Pet")))));
        assert_eq!(nested.to_string(), "Pet[][]");
        assert_eq!(nested.innermost_named(), Some("Pet"));
        assert_eq!(nested.as_named(), None);
    }

    #[test]
    fn test_definition_serialization() {
        let alias = TypeDefinition::Alias {
            members: vec![
                AliasMember::Literal(json!("a")),
                AliasMember::Type(TypeRef::named("Pet")),
            ],
            description: None,
        };
        assert_eq!(
            serde_json::to_value(&alias).unwrap(),
            json!({"kind": "alias", "members": ["a", "Pet"]})
        );
    }

    #[test]
    fn test_referenced_types_and_group() {
        let api = OperationDescriptor {
            path: "/pets/{id}".into(),
            name: "petsByIdPut".into(),
            method: Method::Put,
            tags: vec![],
            description: String::new(),
            param: Some("PetsByIdPutParam".into()),
            query: None,
            body: Some(RequestParam {
                type_name: "PetsByIdPutBody".into(),
                required: true,
            }),
            response: None,
        };
        assert_eq!(
            api.referenced_types(),
            vec!["PetsByIdPutParam", "PetsByIdPutBody"]
        );
        assert_eq!(api.group(), "default");
    }
}

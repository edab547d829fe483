#![deny(missing_docs)]

//! # Document Shims
//!
//! Intermediate Deserialization Layer for the OpenAPI 3.0 subset understood by
//! the resolver. These structs map directly to the YAML/JSON objects.
//!
//! `Schema` is a flat bag of optional keywords rather than a
//! tagged enum: a node may carry several discriminators at once (e.g. `type`
//! next to `allOf`), and the resolver picks one by key presence.

use crate::error::{AppError, AppResult};
use indexmap::IndexMap;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// The only `openapi` version accepted by the parser.
pub const SUPPORTED_VERSION: &str = "3.0.0";

/// Root OpenAPI document.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Document {
    /// OpenAPI version string (e.g. "3.0.0").
    pub openapi: String,
    /// Reusable definitions.
    #[serde(default)]
    pub components: Components,
    /// Path items keyed by path template, in document order.
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
}

impl Document {
    /// Parses a document from JSON text.
    pub fn from_json_str(json: &str) -> AppResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| AppError::Parse(format!("Failed to parse OpenAPI JSON: {}", e)))
    }

    /// Parses a document from YAML text.
    pub fn from_yaml_str(yaml: &str) -> AppResult<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| AppError::Parse(format!("Failed to parse OpenAPI YAML: {}", e)))
    }

    /// Reads a document from disk. `.json` files are parsed as JSON, anything
    /// else as YAML.
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }
}

/// Components object holding reusable definitions.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Components {
    /// Shared schemas addressed by `#/components/schemas/<name>`.
    #[serde(default)]
    pub schemas: IndexMap<String, Schema>,
}

/// HTTP methods recognized inside a path item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// `get`
    Get,
    /// `put`
    Put,
    /// `post`
    Post,
    /// `delete`
    Delete,
    /// `options`
    Options,
    /// `head`
    Head,
    /// `patch`
    Patch,
    /// `trace`
    Trace,
}

impl Method {
    /// Lowercase name as written in the document.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Put => "put",
            Method::Post => "post",
            Method::Delete => "delete",
            Method::Options => "options",
            Method::Head => "head",
            Method::Patch => "patch",
            Method::Trace => "trace",
        }
    }
}

impl FromStr for Method {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "get" => Ok(Method::Get),
            "put" => Ok(Method::Put),
            "post" => Ok(Method::Post),
            "delete" => Ok(Method::Delete),
            "options" => Ok(Method::Options),
            "head" => Ok(Method::Head),
            "patch" => Ok(Method::Patch),
            "trace" => Ok(Method::Trace),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A path item: the operations declared under one path template.
///
/// Keys that are not HTTP methods (`parameters`, `summary`, `servers`, `x-...`)
/// are dropped during deserialization.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct PathItem {
    /// Operations in document order.
    pub operations: IndexMap<Method, Operation>,
}

impl<'de> Deserialize<'de> for PathItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = IndexMap::<String, Value>::deserialize(deserializer)?;
        let mut operations = IndexMap::new();

        for (key, value) in raw {
            let Ok(method) = key.parse::<Method>() else {
                continue;
            };
            let operation = serde_json::from_value::<Operation>(value).map_err(|e| {
                DeError::custom(format!("Failed to parse operation '{}': {}", key, e))
            })?;
            operations.insert(method, operation);
        }

        Ok(Self { operations })
    }
}

/// A single API operation.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Unique operation identifier.
    pub operation_id: Option<String>,
    /// Short summary, used as the descriptor description.
    pub summary: Option<String>,
    /// Operation tags; the first one groups the operation.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Inline parameters.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Request body, inline or by reference.
    pub request_body: Option<RequestBody>,
    /// Responses keyed by status code.
    #[serde(default)]
    pub responses: IndexMap<String, Response>,
}

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// Path segment.
    Path,
    /// Query string.
    Query,
    /// Request header.
    Header,
    /// Cookie.
    Cookie,
}

impl ParameterLocation {
    /// Lowercase name as written in the document.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Cookie => "cookie",
        }
    }
}

/// An inline parameter.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Location of the parameter.
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Value schema.
    pub schema: Option<Schema>,
    /// Whether the parameter must be supplied.
    #[serde(default)]
    pub required: bool,
    /// Human readable description.
    pub description: Option<String>,
}

/// A request body. Either inline `content`, or a `$ref` into
/// `components/requestBodies`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RequestBody {
    /// Shared reference, if the body is not inline.
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    /// Content keyed by media type.
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
    /// Body description.
    pub description: Option<String>,
    /// Whether the body is mandatory.
    #[serde(default)]
    pub required: bool,
}

/// A response object.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Response {
    /// Response description.
    pub description: Option<String>,
    /// Content keyed by media type.
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

/// A media type entry.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MediaType {
    /// Payload schema.
    pub schema: Option<Schema>,
}

/// Value of the `type` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    /// `string`
    String,
    /// `number`
    Number,
    /// `integer`
    Integer,
    /// `boolean`
    Boolean,
    /// `array`
    Array,
    /// `object`
    Object,
    /// Any other value (e.g. `null`); rejected by the resolver.
    #[serde(other)]
    Unknown,
}

/// A schema node.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// The `type` discriminator.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,
    /// `$ref` target.
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Intersection branches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_of: Option<Vec<Schema>>,
    /// "One or more of" branches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<Schema>>,
    /// Exclusive union branches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<Schema>>,
    /// Whether `null` is an accepted value.
    #[serde(default)]
    pub nullable: bool,
    /// Human readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// String format (e.g. `date-time`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Enumerated literal values, in document order.
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enumeration: Option<Vec<Value>>,
    /// Array element schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    /// Object properties, in document order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Schema>>,
    /// Names of mandatory properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl Schema {
    /// Whether the node carries a `type` keyword.
    pub fn is_structural(&self) -> bool {
        self.schema_type.is_some()
    }

    /// Whether the node may appear as a composition branch.
    ///
    /// An `anyOf`-only branch does not qualify and is dropped by the resolver.
    pub fn is_legal_branch(&self) -> bool {
        self.schema_type.is_some()
            || self.reference.is_some()
            || self.all_of.is_some()
            || self.one_of.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_item_skips_non_methods() {
        let yaml = r#"
openapi: 3.0.0
paths:
  /pets:
    summary: Pets
    parameters:
      - {name: x, in: header, schema: {type: string}}
    post:
      responses: {}
    get:
      tags: [pets]
      responses: {}
    x-internal: true
"#;
        let doc = Document::from_yaml_str(yaml).unwrap();
        let item = &doc.paths["/pets"];
        let methods: Vec<Method> = item.operations.keys().copied().collect();
        assert_eq!(methods, vec![Method::Post, Method::Get]);
        assert_eq!(item.operations[&Method::Get].tags, vec!["pets"]);
    }

    #[test]
    fn test_schema_keywords() {
        let yaml = r#"
type: object
required: [id]
properties:
  id: {type: integer}
  kind: {type: string, enum: [a, b], nullable: true}
  tags: {type: array, items: {$ref: '#/components/schemas/Tag'}}
"#;
        let schema: Schema = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(schema.schema_type, Some(SchemaType::Object));
        assert_eq!(schema.required, vec!["id"]);

        let props = schema.properties.as_ref().unwrap();
        let keys: Vec<&str> = props.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["id", "kind", "tags"]);
        assert!(props["kind"].nullable);
        assert_eq!(props["kind"].enumeration.as_ref().unwrap().len(), 2);
        assert_eq!(
            props["tags"].items.as_ref().unwrap().reference.as_deref(),
            Some("#/components/schemas/Tag")
        );
    }

    #[test]
    fn test_unknown_type_is_kept_for_the_resolver() {
        let schema: Schema = serde_json::from_str(r#"{"type": "null"}"#).unwrap();
        assert_eq!(schema.schema_type, Some(SchemaType::Unknown));
    }

    #[test]
    fn test_legal_branch() {
        let any_only: Schema = serde_json::from_str(r#"{"anyOf": []}"#).unwrap();
        assert!(!any_only.is_legal_branch());

        let one_of: Schema = serde_json::from_str(r#"{"oneOf": []}"#).unwrap();
        assert!(one_of.is_legal_branch());
        assert!(!one_of.is_structural());
    }

    #[test]
    fn test_request_body_reference() {
        let body: RequestBody =
            serde_json::from_str(r##"{"$ref": "#/components/requestBodies/Pet"}"##).unwrap();
        assert_eq!(
            body.reference.as_deref(),
            Some("#/components/requestBodies/Pet")
        );
        assert!(body.content.is_empty());
    }

    #[test]
    fn test_from_path_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("doc.json");
        std::fs::write(&json_path, r#"{"openapi": "3.0.0", "paths": {}}"#).unwrap();
        assert_eq!(Document::from_path(&json_path).unwrap().openapi, "3.0.0");

        let yaml_path = dir.path().join("doc.yaml");
        std::fs::write(&yaml_path, "openapi: 3.0.0\n").unwrap();
        let doc = Document::from_path(&yaml_path).unwrap();
        assert!(doc.paths.is_empty());
        assert!(doc.components.schemas.is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Document::from_path(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}

#![deny(missing_docs)]

//! # Schema Parser
//!
//! One resolution pass over a [`Document`]: version check, common-schema
//! pre-pass, then every path and method in document order.
//!
//! The pass borrows the document and returns a fresh [`ParsedApi`]; nothing
//! is shared between passes, so parsing the same document twice yields equal
//! results.

use crate::error::{AppError, AppResult};
use crate::oas::document::{Document, SUPPORTED_VERSION};
use crate::oas::models::OperationDescriptor;
use crate::oas::operations::build_operation;
use crate::oas::options::ParserOptions;
use crate::oas::registry::TypeRegistry;
use crate::oas::resolver::Resolver;
use indexmap::IndexMap;
use serde::Serialize;

/// Frozen output of a pass: the type registry and the operation descriptors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedApi {
    /// Every synthesized type, in registration order.
    pub types: TypeRegistry,
    /// One descriptor per `(path, method)`, in document order.
    pub apis: Vec<OperationDescriptor>,
}

impl ParsedApi {
    /// Groups descriptors by their first tag (`default` when untagged),
    /// keeping document order within and across groups.
    pub fn group_by_tag(&self) -> IndexMap<&str, Vec<&OperationDescriptor>> {
        let mut groups: IndexMap<&str, Vec<&OperationDescriptor>> = IndexMap::new();
        for api in &self.apis {
            groups.entry(api.group()).or_default().push(api);
        }
        groups
    }

    /// Named references without a definition, ignoring `iso_string_type_name`.
    pub fn dangling_references(&self, iso_string_type_name: &str) -> Vec<String> {
        self.types.dangling_references(&[iso_string_type_name])
    }
}

/// Drives the resolver over a document.
#[derive(Debug)]
pub struct SchemaParser<'d> {
    document: &'d Document,
    options: ParserOptions,
}

impl<'d> SchemaParser<'d> {
    /// Creates a parser for `document`.
    pub fn new(document: &'d Document, options: ParserOptions) -> Self {
        Self { document, options }
    }

    /// Runs the pass.
    ///
    /// # Errors
    ///
    /// Fails on an unsupported `openapi` version, an unrecognized schema,
    /// a request body given as `$ref`, or a parameter without a schema.
    pub fn parse(&self) -> AppResult<ParsedApi> {
        if self.document.openapi != SUPPORTED_VERSION {
            return Err(AppError::UnsupportedVersion(self.document.openapi.clone()));
        }

        let mut resolver = Resolver::new(self.options.iso_string_type_name.as_str());

        for (name, schema) in &self.document.components.schemas {
            resolver.resolve("", name, schema)?;
        }
        tracing::debug!(
            count = self.document.components.schemas.len(),
            "resolved common schemas"
        );

        let mut apis = Vec::new();
        for (path, item) in &self.document.paths {
            for (method, operation) in &item.operations {
                apis.push(build_operation(
                    &mut resolver,
                    self.options.path_normalizer.as_ref(),
                    path,
                    *method,
                    operation,
                )?);
            }
        }

        let types = resolver.into_registry();
        tracing::info!(types = types.len(), apis = apis.len(), "document resolved");

        Ok(ParsedApi { types, apis })
    }
}

/// Parses YAML text and runs a pass with `options`.
pub fn parse_openapi_yaml(yaml: &str, options: ParserOptions) -> AppResult<ParsedApi> {
    let document = Document::from_yaml_str(yaml)?;
    SchemaParser::new(&document, options).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::models::{TypeDefinition, TypeRef};

    const PETSTORE: &str = r#"
openapi: 3.0.0
components:
  schemas:
    Pet:
      type: object
      required: [id]
      properties:
        id: {type: integer}
        owner: {$ref: '#/components/schemas/Owner'}
paths:
  /pets:
    get:
      tags: [pets]
      responses:
        '200':
          content:
            application/json:
              schema: {type: array, items: {$ref: '#/components/schemas/Pet'}}
    post:
      tags: [pets]
      requestBody:
        content:
          application/json:
            schema: {$ref: '#/components/schemas/Pet'}
      responses: {}
  /health:
    get:
      responses: {}
"#;

    #[test]
    fn test_version_check() {
        let doc = Document::from_yaml_str("openapi: 3.1.0\n").unwrap();
        let err = SchemaParser::new(&doc, ParserOptions::default())
            .parse()
            .unwrap_err();
        assert!(matches!(err, AppError::UnsupportedVersion(ref v) if v == "3.1.0"));
    }

    #[test]
    fn test_common_schemas_first() {
        let parsed = parse_openapi_yaml(PETSTORE, ParserOptions::default()).unwrap();
        assert_eq!(parsed.types.names().next(), Some("Pet"));
        assert_eq!(parsed.apis.len(), 3);
    }

    #[test]
    fn test_body_requiredness_follows_referenced_record() {
        let parsed = parse_openapi_yaml(PETSTORE, ParserOptions::default()).unwrap();
        let post = &parsed.apis[1];
        let body = post.body.as_ref().unwrap();
        assert_eq!(body.type_name, "PetsPostBody");
        assert!(body.required);
    }

    #[test]
    fn test_array_response_binds_nothing() {
        let parsed = parse_openapi_yaml(PETSTORE, ParserOptions::default()).unwrap();
        assert!(parsed.apis[0].response.is_none());
        assert!(!parsed.types.contains("PetsGetResponse"));
    }

    #[test]
    fn test_group_by_tag() {
        let parsed = parse_openapi_yaml(PETSTORE, ParserOptions::default()).unwrap();
        let groups = parsed.group_by_tag();
        let keys: Vec<&str> = groups.keys().copied().collect();
        assert_eq!(keys, vec!["pets", "default"]);
        assert_eq!(groups["pets"].len(), 2);
        assert_eq!(groups["default"][0].name, "healthGet");
    }

    #[test]
    fn test_dangling_references() {
        let parsed = parse_openapi_yaml(PETSTORE, ParserOptions::default()).unwrap();
        assert_eq!(parsed.dangling_references("string"), vec!["Owner".to_string()]);
    }

    #[test]
    fn test_iso_type_in_registry() {
        let yaml = r#"
openapi: 3.0.0
components:
  schemas:
    Event:
      type: object
      properties:
        at: {type: string, format: date-time}
"#;
        let options = ParserOptions::default().with_iso_string_type("Date");
        let parsed = parse_openapi_yaml(yaml, options).unwrap();
        match parsed.types.get("Event") {
            Some(TypeDefinition::Record { fields }) => {
                assert_eq!(fields[0].ty, TypeRef::named("Date"))
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(parsed.dangling_references("Date").is_empty());
    }
}

#![deny(missing_docs)]

//! # Operation Descriptors
//!
//! Builds one [`OperationDescriptor`] per `(path, method)`, resolving the
//! operation's parameters, request body and success response into registry
//! types along the way.

use crate::error::{AppError, AppResult};
use crate::oas::document::{Method, Operation, ParameterLocation};
use crate::oas::models::{
    AliasMember, FieldRecord, OperationDescriptor, RequestParam, TypeDefinition, TypeRef,
};
use crate::oas::naming::{api_path_name, operation_name, synthesize};
use crate::oas::options::PathNormalizer;
use crate::oas::resolver::Resolver;

/// The only media type inspected for bodies and responses.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// The only response status inspected.
pub const SUCCESS_STATUS: &str = "200";

/// Registry names of the four slots an operation can bind.
struct SlotNames {
    param: String,
    query: String,
    body: String,
    response: String,
}

impl SlotNames {
    fn new(context: &str) -> Self {
        Self {
            param: synthesize(context, "param", None),
            query: synthesize(context, "query", None),
            body: synthesize(context, "body", None),
            response: synthesize(context, "response", None),
        }
    }
}

/// Resolves a single operation and assembles its descriptor.
pub fn build_operation(
    resolver: &mut Resolver,
    normalizer: &dyn PathNormalizer,
    path: &str,
    method: Method,
    operation: &Operation,
) -> AppResult<OperationDescriptor> {
    let path_name = api_path_name(&normalizer.normalize(path));
    let context = synthesize(&path_name, method.as_str(), None);
    let slots = SlotNames::new(&context);

    tracing::debug!(%path, %method, %context, "building operation");

    resolve_parameters(resolver, &context, &slots, path, method, operation)?;
    resolve_body(resolver, &context, &slots, path, method, operation)?;
    resolve_response(resolver, &context, operation)?;

    let registry = resolver.registry();
    let request_param = |name: &str| {
        registry.contains(name).then(|| RequestParam {
            type_name: name.to_string(),
            required: !registry.is_all_optional(name),
        })
    };

    Ok(OperationDescriptor {
        path: path.to_string(),
        name: operation_name(&path_name, method.as_str()),
        method,
        tags: operation.tags.clone(),
        description: operation.summary.clone().unwrap_or_default(),
        param: registry.contains(&slots.param).then(|| slots.param.clone()),
        query: request_param(&slots.query),
        body: request_param(&slots.body),
        response: registry
            .contains(&slots.response)
            .then(|| slots.response.clone()),
    })
}

/// Registers the `Query` and `Param` records from `path` and `query` parameters.
fn resolve_parameters(
    resolver: &mut Resolver,
    context: &str,
    slots: &SlotNames,
    path: &str,
    method: Method,
    operation: &Operation,
) -> AppResult<()> {
    let mut query = Vec::new();
    let mut param = Vec::new();

    for parameter in &operation.parameters {
        let target = match parameter.location {
            ParameterLocation::Path => &mut param,
            ParameterLocation::Query => &mut query,
            ParameterLocation::Header | ParameterLocation::Cookie => continue,
        };

        let schema = parameter
            .schema
            .as_ref()
            .ok_or_else(|| AppError::MissingParameterSchema {
                path: path.to_string(),
                method: method.to_string(),
                name: parameter.name.clone(),
            })?;

        let location_context = synthesize(context, parameter.location.as_str(), None);
        let ty = resolver.resolve(&location_context, &parameter.name, schema)?;

        target.push(FieldRecord {
            field: parameter.name.clone(),
            ty,
            required: parameter.required,
            nullable: false,
            description: parameter.description.clone().unwrap_or_default(),
        });
    }

    if !query.is_empty() {
        resolver.register(slots.query.as_str(), TypeDefinition::Record { fields: query });
    }
    if !param.is_empty() {
        resolver.register(slots.param.as_str(), TypeDefinition::Record { fields: param });
    }
    Ok(())
}

/// Registers the `Body` alias for an inline JSON request body.
fn resolve_body(
    resolver: &mut Resolver,
    context: &str,
    slots: &SlotNames,
    path: &str,
    method: Method,
    operation: &Operation,
) -> AppResult<()> {
    let Some(body) = &operation.request_body else {
        return Ok(());
    };

    if let Some(reference) = &body.reference {
        return Err(AppError::UnsupportedRequestBodyRef {
            path: path.to_string(),
            method: method.to_string(),
            reference: reference.clone(),
        });
    }

    let Some(schema) = body
        .content
        .get(JSON_MEDIA_TYPE)
        .and_then(|media| media.schema.as_ref())
    else {
        return Ok(());
    };

    let ty = resolver.resolve(context, "body", schema)?;

    // An inline compound body resolves to the body name itself; the alias
    // replaces it and the body has no known fields.
    resolver.register(
        slots.body.as_str(),
        TypeDefinition::Alias {
            members: vec![AliasMember::Type(ty)],
            description: None,
        },
    );
    Ok(())
}

/// Resolves the success JSON response schema, if any.
fn resolve_response(
    resolver: &mut Resolver,
    context: &str,
    operation: &Operation,
) -> AppResult<Option<TypeRef>> {
    let schema = operation
        .responses
        .get(SUCCESS_STATUS)
        .and_then(|response| response.content.get(JSON_MEDIA_TYPE))
        .and_then(|media| media.schema.as_ref());

    match schema {
        Some(schema) => resolver.resolve(context, "response", schema).map(Some),
        None => Ok(None),
    }
}

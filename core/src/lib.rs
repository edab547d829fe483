#![deny(missing_docs)]

//! # Typegen Core
//!
//! Resolves an OpenAPI 3.0 document into a registry of named type definitions
//! and a list of per-operation descriptors, ready for an emitter.

/// Shared error types.
pub mod error;

/// OpenAPI (OAS) resolution.
pub mod oas;

pub use error::{AppError, AppResult};
pub use oas::{
    parse_openapi_yaml, AliasMember, Document, FieldRecord, IdentityPath, Method,
    OperationDescriptor, ParsedApi, ParserOptions, PathNormalizer, PrefixPattern, RequestParam,
    SchemaParser, TypeDefinition, TypeRef, TypeRegistry,
};

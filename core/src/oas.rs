#![deny(missing_docs)]

//! # OpenAPI Resolution Module
//!
//! - **document**: Deserialization shims for the supported OpenAPI subset.
//! - **naming**: Deterministic type and operation name synthesis.
//! - **models**: Intermediate Representation (type definitions, descriptors).
//! - **registry**: Name-keyed store of synthesized type definitions.
//! - **resolver**: Recursive schema to type resolution.
//! - **operations**: Per-operation descriptor assembly.
//! - **options**: Path normalization and ISO date type configuration.
//! - **parser**: Orchestrates a full pass over a document.

pub mod document;
pub mod models;
pub mod naming;
pub mod operations;
pub mod options;
pub mod parser;
pub mod registry;
pub mod resolver;

// Re-export public API
pub use document::{Document, Method};
pub use models::{
    AliasMember, FieldRecord, OperationDescriptor, RequestParam, TypeDefinition, TypeRef,
};
pub use options::{IdentityPath, ParserOptions, PathNormalizer, PrefixPattern};
pub use parser::{parse_openapi_yaml, ParsedApi, SchemaParser};
pub use registry::TypeRegistry;

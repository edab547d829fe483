//! # Error Handling
//!
//! Provides the unified `AppError` enum used by the resolver pass.
//!
//! Every variant is fatal: a pass that returns an error produced no usable
//! registry or descriptor list.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `Parse`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors (reading a document from disk).
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The document text could not be deserialized.
    #[display("Parse Error: {_0}")]
    Parse(String),

    /// The document declares an `openapi` version other than the supported one.
    #[from(ignore)]
    #[display("Unsupported OpenAPI version: {_0}. Only 3.0.0 is supported.")]
    UnsupportedVersion(String),

    /// A schema node carries none of the recognized discriminators.
    #[from(ignore)]
    #[display("Unrecognized schema shape at '{context}' / '{field}'")]
    UnrecognizedSchema {
        /// Naming context the schema was resolved under.
        context: String,
        /// Field name the schema was resolved for.
        field: String,
    },

    /// The request body is a `$ref` into `components/requestBodies`.
    #[from(ignore)]
    #[display("Request body of {method} {path} uses shared reference '{reference}', which is not supported")]
    UnsupportedRequestBodyRef {
        /// Path template of the operation.
        path: String,
        /// HTTP method of the operation.
        method: String,
        /// The `$ref` string found on the request body.
        reference: String,
    },

    /// A path or query parameter declares no inline `schema`.
    #[from(ignore)]
    #[display("Parameter '{name}' of {method} {path} has no schema")]
    MissingParameterSchema {
        /// Path template of the operation.
        path: String,
        /// HTTP method of the operation.
        method: String,
        /// Parameter name.
        name: String,
    },
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_conversion() {
        let io_err = Error::new(ErrorKind::Other, "test");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_string_conversion() {
        let msg = String::from("bad yaml");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::Parse(s) => assert_eq!(s, "bad yaml"),
            _ => panic!("String should convert to AppError::Parse"),
        }
    }

    #[test]
    fn test_display_messages() {
        let err = AppError::UnsupportedVersion("3.1.0".into());
        assert_eq!(
            err.to_string(),
            "Unsupported OpenAPI version: 3.1.0. Only 3.0.0 is supported."
        );

        let err = AppError::UnsupportedRequestBodyRef {
            path: "/pets".into(),
            method: "post".into(),
            reference: "#/components/requestBodies/Pet".into(),
        };
        assert_eq!(
            err.to_string(),
            "Request body of post /pets uses shared reference '#/components/requestBodies/Pet', which is not supported"
        );
    }
}

#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use derive_more::{Display, From};
use typegen_core::AppError;

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// IO Error wrapper.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// Resolution failure from the core pass.
    #[display("{}", _0)]
    Core(AppError),

    /// The configuration file is missing or malformed.
    #[from(ignore)]
    #[display("Config Error: {}", _0)]
    Config(String),

    /// General failure message.
    #[display("Operation failed: {}", _0)]
    General(String),
}

/// Manual implementation of the standard Error trait.
///
/// We implement this manually (instead of `derive(Error)`) because the `General(String)`
/// variant contains a `String`, which does not implement `std::error::Error`.
impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_passes_through() {
        let err: CliError = AppError::UnsupportedVersion("2.0".into()).into();
        assert_eq!(
            err.to_string(),
            "Unsupported OpenAPI version: 2.0. Only 3.0.0 is supported."
        );
    }

    #[test]
    fn test_string_is_general() {
        let err: CliError = String::from("boom").into();
        assert!(matches!(err, CliError::General(_)));
    }
}

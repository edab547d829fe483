#![deny(missing_docs)]

//! # Parser Options
//!
//! Values the resolver consumes but does not own: how an API path is
//! normalized before it becomes a naming root, and which type name replaces
//! `format: date-time` strings.

use regex::Regex;
use std::borrow::Cow;
use std::fmt;

/// Default substitution for `date-time` strings.
pub const DEFAULT_ISO_STRING_TYPE: &str = "string";

/// Maps an API path template to the text used for naming its operations.
pub trait PathNormalizer {
    /// Returns the normalized path.
    fn normalize<'a>(&self, path: &'a str) -> Cow<'a, str>;
}

impl<F> PathNormalizer for F
where
    F: Fn(&str) -> String,
{
    fn normalize<'a>(&self, path: &'a str) -> Cow<'a, str> {
        Cow::Owned(self(path))
    }
}

/// Leaves paths untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityPath;

impl PathNormalizer for IdentityPath {
    fn normalize<'a>(&self, path: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(path)
    }
}

/// Drops everything up to and including the first match of a pattern.
///
/// `PrefixPattern::new(r"/v1/")` turns `/v1/foo/{id}` into `foo/{id}`.
/// Paths without a match are returned unchanged.
#[derive(Debug, Clone)]
pub struct PrefixPattern {
    pattern: Regex,
}

impl PrefixPattern {
    /// Compiles the prefix pattern.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }
}

impl PathNormalizer for PrefixPattern {
    fn normalize<'a>(&self, path: &'a str) -> Cow<'a, str> {
        match self.pattern.find(path) {
            Some(m) => Cow::Borrowed(&path[m.end()..]),
            None => Cow::Borrowed(path),
        }
    }
}

/// Configuration consumed by [`crate::oas::SchemaParser`].
pub struct ParserOptions {
    /// Path normalizer applied before deriving operation names.
    pub path_normalizer: Box<dyn PathNormalizer>,
    /// Type name substituted for `format: date-time` strings.
    pub iso_string_type_name: String,
}

impl ParserOptions {
    /// Replaces the path normalizer.
    pub fn with_path_normalizer(mut self, normalizer: impl PathNormalizer + 'static) -> Self {
        self.path_normalizer = Box::new(normalizer);
        self
    }

    /// Replaces the ISO date-time type name.
    pub fn with_iso_string_type(mut self, name: impl Into<String>) -> Self {
        self.iso_string_type_name = name.into();
        self
    }
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            path_normalizer: Box::new(IdentityPath),
            iso_string_type_name: DEFAULT_ISO_STRING_TYPE.to_string(),
        }
    }
}

impl fmt::Debug for ParserOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserOptions")
            .field("iso_string_type_name", &self.iso_string_type_name)
            .finish_non_exhaustive()
    }
}

#![deny(missing_docs)]

//! # Naming Utilities
//!
//! Deterministic derivation of type and operation names from naming contexts,
//! field names and API paths.

use regex::Regex;
use std::sync::OnceLock;

/// Suffix for the element context of an array.
pub const ITEM_SUFFIX: &str = "item";
/// Suffix for enum alias types.
pub const UNION_SUFFIX: &str = "union";
/// Suffix for the intersection member synthesized by `anyOf`.
pub const ALL_OF_SUFFIX: &str = "allOf";

/// Joins `-`-separated pieces, capitalizing the first letter of every piece.
///
/// With `first_upper == false` the first letter of the first piece is
/// lower-cased instead (used for operation names).
///
/// e.g. `camel_case("pets-byId-get", true)` -> `PetsByIdGet`
pub fn camel_case(s: &str, first_upper: bool) -> String {
    let mut result = String::with_capacity(s.len());
    for (i, piece) in s.split('-').enumerate() {
        let mut chars = piece.chars();
        if let Some(first) = chars.next() {
            if i == 0 && !first_upper {
                result.push(first.to_ascii_lowercase());
            } else {
                result.push(first.to_ascii_uppercase());
            }
            result.push_str(chars.as_str());
        }
    }
    result
}

/// Synthesizes a type name from a naming context, a field and an optional suffix.
///
/// Pure function of its inputs: identical arguments always give the identical name.
pub fn synthesize(context: &str, field: &str, suffix: Option<&str>) -> String {
    match suffix {
        Some(suffix) => camel_case(&format!("{}-{}-{}", context, field, suffix), true),
        None => camel_case(&format!("{}-{}", context, field), true),
    }
}

/// Operation function name: path name and method, first letter lower-cased.
///
/// e.g. `("PetsById", "get")` -> `petsByIdGet`
pub fn operation_name(api_path_name: &str, method: &str) -> String {
    camel_case(&format!("{}-{}", api_path_name, method), false)
}

/// Converts a (normalized) path template into its naming root.
///
/// `{param}` segments become `By<Param>`, every other segment is camel-cased.
///
/// e.g. `foo/{id}/bar` -> `FooByIdBar`
pub fn api_path_name(path: &str) -> String {
    static PARAM_RE: OnceLock<Regex> = OnceLock::new();
    let param_re = PARAM_RE.get_or_init(|| Regex::new(r"^\{([^{}]+)\}$").expect("Invalid regex"));

    path.split('/')
        .map(|segment| match param_re.captures(segment) {
            Some(caps) => format!("By{}", camel_case(&caps[1], true)),
            None => camel_case(segment, true),
        })
        .collect()
}

#![deny(missing_docs)]

//! # Naming Utilities
//!
//! Helpers for deriving operation and type names from `operationId`s and path templates.

use heck::ToLowerCamelCase;

/// Suffix of the synthetic path variable interface.
pub const PATH_VAR_SUFFIX: &str = "PathVar";
/// Suffix of the synthetic query interface.
pub const QUERY_SUFFIX: &str = "Query";
/// Suffix of an inline request body interface.
pub const BODY_SUFFIX: &str = "Body";
/// Suffix of an inline response body interface.
pub const RES_SUFFIX: &str = "Res";

/// Strips the `Using<Method>` tail some generators append to `operationId`.
///
/// e.g. `getPetUsingGET` -> `getPet`
pub fn strip_using_suffix(operation_id: &str) -> &str {
    match operation_id.rfind("Using") {
        Some(idx)
            if idx > 0
                && operation_id[idx + "Using".len()..]
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_') =>
        {
            &operation_id[..idx]
        }
        _ => operation_id,
    }
}

/// Derives an operation name from the HTTP Method and URL path when `operationId` is missing.
///
/// e.g. `GET /pets/{id}` -> `getPetsId`
pub fn derive_operation_name(method: &str, path: &str) -> String {
    let clean_path = path.replace(['{', '}', '/'], " ");
    format!("{} {}", method.to_lowercase(), clean_path).to_lower_camel_case()
}

/// The base name of an operation.
pub fn operation_base_name(operation_id: Option<&str>, method: &str, path: &str) -> String {
    match operation_id.map(str::trim).filter(|id| !id.is_empty()) {
        Some(id) => strip_using_suffix(id).to_string(),
        None => derive_operation_name(method, path),
    }
}

/// Builds a synthetic type name: the base name with its first letter upper-cased, plus `suffix`.
///
/// e.g. (`getPet`, `PathVar`) -> `GetPetPathVar`
pub fn type_name(base: &str, suffix: &str) -> String {
    let mut chars = base.chars();
    match chars.next() {
        Some(first) => format!("{}{}{}", first.to_uppercase(), chars.as_str(), suffix),
        None => suffix.to_string(),
    }
}

/// Extracts the `{brace}` variable names of a path template, in order.
///
/// e.g. `/users/{userId}/posts/{postId}` -> `["userId", "postId"]`
pub fn extract_path_variables(path: &str) -> Vec<String> {
    path.split('{')
        .skip(1)
        .filter_map(|segment| segment.split_once('}'))
        .map(|(name, _)| name.trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

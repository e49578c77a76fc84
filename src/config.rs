//! # Parser Options
//!
//! Knobs that shape how an operation is turned into interfaces.

use serde::{Deserialize, Serialize};

/// Response key consulted for the response body when nothing else is configured.
pub const DEFAULT_SUCCESS_STATUS: &str = "200";

/// Options for [`parse_operation`](crate::parse_operation) and
/// [`parse_document`](crate::parse_document).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParserOptions {
    /// Honour the `required` list of body schemas.
    /// When `false` every body/response field is optional.
    /// Parameters always honour `required`.
    pub mark_required: bool,
    /// The response key whose first content schema becomes the `res` type.
    pub success_status: String,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            mark_required: true,
            success_status: DEFAULT_SUCCESS_STATUS.to_string(),
        }
    }
}

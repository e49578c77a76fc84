#![deny(missing_docs)]

//! # CDD Interfaces
//!
//! Derives typed client interface declarations from an OpenAPI 3.0 operation.
//!
//! For one path + method the crate produces four top-level type names (path variables,
//! query, request body, response body) together with a flat, deduplicated list of every
//! named interface those types reference. Rendering the result to source text is left to
//! the caller; [`ParseResult`] serializes to JSON for that purpose.
//!
//! ```
//! use cdd_interfaces::{parse_operation, OpenApiDocument, ParserOptions};
//!
//! let doc = OpenApiDocument::from_yaml_str(r#"
//! paths:
//!   /pets/{id}:
//!     get:
//!       operationId: getPetUsingGET
//!       parameters:
//!         - { name: id, in: path, required: true, schema: { type: integer } }
//! "#).unwrap();
//!
//! let result = parse_operation(&doc, "/pets/{id}", "GET", &ParserOptions::default()).unwrap();
//! assert_eq!(result.name, "getPet");
//! assert_eq!(result.path_var.as_deref(), Some("GetPetPathVar"));
//! ```

/// Shared error types.
pub mod error;

/// Parser options.
pub mod config;

/// OpenAPI (OAS) parsing and resolution.
pub mod oas;

pub use config::ParserOptions;
pub use error::{AppError, AppResult};
pub use oas::{
    load_document, parse_document, parse_operation, Field, FieldType, Interface, Notice,
    OpenApiDocument, ParseResult,
};

#![deny(missing_docs)]

//! # OpenAPI Parsing Module
//!
//! - **document**: Serde models of the consumed document subset, and loading.
//! - **models**: Intermediate Representation handed to a renderer.
//! - **resolver**: Logic for mapping schemas to interfaces.
//! - **routes**: Per-operation orchestration and naming.

pub mod document;
pub mod models;
pub mod resolver;
pub mod routes;

pub use document::{load_document, OpenApiDocument};
pub use models::{Field, FieldType, Interface, Notice, ParseResult};
pub use routes::{parse_document, parse_operation};

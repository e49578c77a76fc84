#![deny(missing_docs)]

//! # Resolver Module
//!
//! Logic for resolving OpenAPI schemas into flat, deduplicated interface definitions.
//!
//! Handles:
//! - Primitive type mapping (`types`).
//! - Reference and property resolution with a cycle guard (`refs`).
//! - Parameter lists folded into synthetic interfaces (`params`).
//! - Request/response body schemas (`body`).

pub mod body;
pub mod params;
pub mod refs;
pub mod types;

pub use refs::{reference_name, SchemaResolver};
pub use types::{field_type_of, map_primitive_type};

#![deny(missing_docs)]

//! # Body Resolution
//!
//! Turns a request or response content schema into a single type name.
//!
//! - `array` of `$ref` -> the element interface name (no `[]`)
//! - `array` of primitives -> e.g. `number[]`, nothing registered
//! - `$ref` -> the referenced interface
//! - anything else -> an inline object registered under the default name

use crate::oas::document::{Schema, SchemaType};
use crate::oas::models::FieldType;
use crate::oas::resolver::refs::{reference_name, SchemaResolver};
use crate::oas::resolver::types::map_primitive_type;

impl SchemaResolver<'_> {
    /// Resolves a top-level body schema and returns the type name to use for it.
    ///
    /// Returns `None` when nothing could be produced (empty schema, missing definition).
    pub fn resolve_schema(
        &mut self,
        schema: &Schema,
        default_name: &str,
        mark_required: bool,
    ) -> Option<String> {
        if schema.schema_type == Some(SchemaType::Array) {
            if let Some(reference) = schema.items.as_ref().and_then(|i| i.reference.as_deref()) {
                self.resolve_reference(reference, mark_required);
                return self.root_name().map(str::to_string);
            }
            return match map_primitive_type(schema)? {
                FieldType::Named(name) => Some(name),
                // Arrays nested more than one level around a `$ref`.
                FieldType::Reference { reference, suffix } => {
                    self.resolve_reference(&reference, mark_required);
                    let target = reference_name(&reference);
                    if self.contains(target) {
                        Some(format!("{}{}", target, suffix))
                    } else {
                        Some(format!("{}{}", reference, suffix))
                    }
                }
            };
        }

        match schema.reference.as_deref() {
            Some(reference) => self.resolve_reference(reference, mark_required),
            None => self.resolve_properties(default_name, Some(schema), mark_required),
        }
        self.root_name().map(str::to_string)
    }
}

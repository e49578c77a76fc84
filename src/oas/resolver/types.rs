#![deny(missing_docs)]

//! # Type Mapping
//!
//! Maps a schema's `type`/`format` to a client-side scalar or array type expression.
//!
//! - `type: file` or `format: binary` -> `File`
//! - `number` / `integer` -> `number`
//! - `string` / `boolean` / `object` -> same name
//! - `array` -> element type + `[]`, element `$ref`s stay pending

use crate::oas::document::{Schema, SchemaType};
use crate::oas::models::FieldType;

/// Client type for uploads.
pub const FILE_TYPE: &str = "File";

/// Client type for both integer and floating point numbers.
pub const NUMBER_TYPE: &str = "number";

/// Maps a schema to a type expression.
///
/// Returns `None` when the schema cannot be represented (no `type`, an unknown `type`,
/// or an array whose `items` say nothing).
pub fn map_primitive_type(schema: &Schema) -> Option<FieldType> {
    if schema.schema_type == Some(SchemaType::File) || schema.format.as_deref() == Some("binary") {
        return Some(FieldType::named(FILE_TYPE));
    }

    match schema.schema_type? {
        SchemaType::Number | SchemaType::Integer => Some(FieldType::named(NUMBER_TYPE)),
        SchemaType::String => Some(FieldType::named("string")),
        SchemaType::Boolean => Some(FieldType::named("boolean")),
        SchemaType::Object => Some(FieldType::named("object")),
        SchemaType::Array => {
            let items = schema.items.as_deref()?;
            if let Some(reference) = &items.reference {
                Some(FieldType::reference(reference.clone()).into_array())
            } else if items.schema_type.is_some() {
                map_primitive_type(items).map(FieldType::into_array)
            } else {
                None
            }
        }
        SchemaType::File | SchemaType::Unknown => None,
    }
}

/// Type expression of a property or parameter schema.
///
/// A `$ref` wins and is kept pending; otherwise a declared `type` is mapped.
/// Anything else is unrepresentable.
pub fn field_type_of(schema: &Schema) -> Option<FieldType> {
    if let Some(reference) = &schema.reference {
        return Some(FieldType::reference(reference.clone()));
    }
    if schema.schema_type.is_some() {
        return map_primitive_type(schema);
    }
    None
}

#![deny(missing_docs)]

//! # Parameter Resolution
//!
//! Folds a list of operation parameters (path or query) into one synthetic interface.
//!
//! Parameters always honour their own `required` flag, and any schema `$ref` they carry is
//! resolved with required-marking switched on.

use crate::oas::document::Parameter;
use crate::oas::models::{Field, Interface, Notice};
use crate::oas::resolver::refs::SchemaResolver;
use crate::oas::resolver::types::field_type_of;

impl SchemaResolver<'_> {
    /// Builds the interface `name` from `parameters` and registers it.
    ///
    /// Returns `false` (and registers nothing) when no parameter produced a field.
    pub fn resolve_parameters(&mut self, name: &str, parameters: &[Parameter]) -> bool {
        let mut fields = Vec::with_capacity(parameters.len());

        for param in parameters {
            let schema = param.schema.as_ref();
            if let Some(reference) = schema.and_then(|s| s.reference.as_deref()) {
                self.resolve_reference(reference, true);
            }

            match schema.and_then(field_type_of) {
                Some(ty) => fields.push(Field {
                    name: param.name.clone(),
                    ty,
                    optional: !param.required,
                    description: param.description.clone(),
                    format: schema.and_then(|s| s.format.clone()),
                }),
                None => self.note(Notice::IgnoredField {
                    field: param.name.clone(),
                    owner: name.to_string(),
                }),
            }
        }

        if fields.is_empty() {
            return false;
        }

        self.register(Interface {
            name: name.to_string(),
            fields,
            description: None,
        });
        self.resolve_pending(name, true);
        true
    }
}

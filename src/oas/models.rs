#![deny(missing_docs)]

//! # Interface Models
//!
//! Intermediate Representation (IR) produced by the resolvers and handed to a renderer.
//!
//! Everything here is `Serialize` so the renderer can just as well live in another process
//! and read the result as JSON.

use derive_more::Display;
use serde::{Serialize, Serializer};

/// Prefix of a reference into the named definitions table.
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Suffix appended to a type expression to make it an array.
pub const ARRAY_SUFFIX: &str = "[]";

/// The type expression of a field.
///
/// Fields are first built with `Reference` for anything that came from a `$ref`; once every
/// field of an interface exists the references are resolved and rewritten to `Named`.
/// A `Reference` that survives resolution points at a definition that does not exist or
/// has no properties; either case is reported as a [`Notice`].
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum FieldType {
    /// A primitive (`number`, `string[]`) or a resolved interface name (`Pet`, `Pet[]`).
    #[display("{_0}")]
    Named(String),
    /// A raw `$ref` plus any array brackets wrapped around it.
    #[display("{reference}{suffix}")]
    Reference {
        /// The `$ref` string, e.g. `#/components/schemas/Pet`.
        reference: String,
        /// Zero or more `[]`.
        suffix: String,
    },
}

impl FieldType {
    /// Shorthand for `FieldType::Named`.
    pub fn named(name: impl Into<String>) -> Self {
        FieldType::Named(name.into())
    }

    /// A bare reference with no array suffix.
    pub fn reference(reference: impl Into<String>) -> Self {
        FieldType::Reference {
            reference: reference.into(),
            suffix: String::new(),
        }
    }

    /// Wraps the expression in one more array level.
    pub fn into_array(self) -> Self {
        match self {
            FieldType::Named(name) => FieldType::Named(format!("{}{}", name, ARRAY_SUFFIX)),
            FieldType::Reference { reference, suffix } => FieldType::Reference {
                reference,
                suffix: format!("{}{}", suffix, ARRAY_SUFFIX),
            },
        }
    }

    /// Whether this is a still-unresolved reference.
    pub fn is_reference(&self) -> bool {
        matches!(self, FieldType::Reference { .. })
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A member of an [`Interface`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Property or parameter name.
    pub name: String,
    /// Rendered type expression.
    #[serde(rename = "type")]
    pub ty: FieldType,
    /// Whether the member may be omitted.
    pub optional: bool,
    /// Description carried over from the schema or parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `format` carried over from the schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// A named, ordered list of fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interface {
    /// Type name, unique within one parse.
    pub name: String,
    /// Members in declaration order.
    pub fields: Vec<Field>,
    /// Description of the owning definition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Interface {
    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Advisory diagnostics gathered while resolving.
///
/// Notices never change what gets produced; they only explain what was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Notice {
    /// A property or parameter without a representable type was left out.
    #[display("the {field} attribute of the {owner} is ignored")]
    IgnoredField {
        /// The dropped member.
        field: String,
        /// The `$ref` of the owning definition, or the interface name for inline schemas
        /// and parameter lists.
        owner: String,
    },
    /// A `$ref` names a definition that does not exist; the raw text was kept.
    #[display("the reference {reference} could not be resolved")]
    UnresolvedReference {
        /// The `$ref` string.
        reference: String,
    },
    /// A `$ref` names a definition without usable properties; nothing was registered and the
    /// raw text was kept.
    #[display("the reference {reference} has no properties and is left unresolved")]
    EmptyDefinition {
        /// The `$ref` string.
        reference: String,
    },
    /// A parameter `$ref` could not be found in `#/components/parameters`.
    #[display("the parameter {reference} could not be resolved and is skipped")]
    UnresolvedParameter {
        /// The `$ref` string.
        reference: String,
    },
}

/// Everything derived from one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    /// Base name derived from `operationId`.
    pub name: String,
    /// `summary` and `description` joined by a comma.
    pub comment: String,
    /// Whether the first request media type is `multipart/form-data`.
    pub is_form_data: bool,
    /// Path variable interface name.
    pub path_var: Option<String>,
    /// Query parameter interface name.
    pub query: Option<String>,
    /// Request body type name.
    pub body: Option<String>,
    /// Response body type name.
    pub res: Option<String>,
    /// Every interface the four names need, unique by name.
    pub interfaces: Vec<Interface>,
    /// Diagnostics collected along the way.
    pub notices: Vec<Notice>,
}

impl ParseResult {
    /// Looks up an interface by name.
    pub fn interface(&self, name: &str) -> Option<&Interface> {
        self.interfaces.iter().find(|i| i.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_display() {
        assert_eq!(FieldType::named("number").to_string(), "number");
        let nested = FieldType::reference("#/components/schemas/Pet")
            .into_array()
            .into_array();
        assert_eq!(nested.to_string(), "#/components/schemas/Pet[][]");
        assert!(nested.is_reference());
    }

    #[test]
    fn test_notice_display_is_greppable() {
        let notice = Notice::IgnoredField {
            field: "tags".into(),
            owner: "#/components/schemas/Pet".into(),
        };
        assert_eq!(
            notice.to_string(),
            "the tags attribute of the #/components/schemas/Pet is ignored"
        );
    }

    #[test]
    fn test_serialize_shape() {
        let result = ParseResult {
            name: "getPet".into(),
            comment: String::new(),
            is_form_data: false,
            path_var: Some("GetPetPathVar".into()),
            query: None,
            body: None,
            res: None,
            interfaces: vec![Interface {
                name: "GetPetPathVar".into(),
                fields: vec![Field {
                    name: "id".into(),
                    ty: FieldType::named("number"),
                    optional: false,
                    description: None,
                    format: None,
                }],
                description: None,
            }],
            notices: vec![Notice::UnresolvedReference {
                reference: "#/components/schemas/Gone".into(),
            }],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["pathVar"], "GetPetPathVar");
        assert_eq!(json["isFormData"], false);
        assert!(json["query"].is_null());
        assert_eq!(json["interfaces"][0]["fields"][0]["type"], "number");
        assert_eq!(json["notices"][0]["kind"], "unresolvedReference");
    }
}

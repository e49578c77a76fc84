#![deny(missing_docs)]

//! # OpenAPI Document
//!
//! Serde models for the subset of an OpenAPI 3.0 document that the resolvers consume,
//! plus helpers to load one from disk or from memory.
//!
//! Everything keyed by name is an `IndexMap` so declaration order survives parsing:
//! property order drives field order, and "first declared media type" is well defined.

use crate::error::AppResult;
use indexmap::IndexMap;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::Path;

/// The root of an OpenAPI document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OpenApiDocument {
    /// The `openapi` version string, if declared.
    pub openapi: Option<String>,
    /// Path templates mapped to their operations.
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
    /// Reusable components.
    #[serde(default)]
    pub components: Components,
}

impl OpenApiDocument {
    /// Parses a document from YAML (or JSON, which YAML accepts).
    pub fn from_yaml_str(content: &str) -> AppResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parses a document from JSON.
    pub fn from_json_str(content: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// The named schema definitions (`#/components/schemas`).
    pub fn definitions(&self) -> &IndexMap<String, Schema> {
        &self.components.schemas
    }

    /// Looks up an operation by exact path template and case-insensitive method.
    pub fn operation(&self, path: &str, method: &str) -> Option<&Operation> {
        self.paths.get(path)?.operation(method)
    }
}

/// Reads an OpenAPI document from `path`.
///
/// Files ending in `.json` go through `serde_json`; anything else is treated as YAML.
pub fn load_document(path: impl AsRef<Path>) -> AppResult<OpenApiDocument> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        OpenApiDocument::from_json_str(&content)
    } else {
        OpenApiDocument::from_yaml_str(&content)
    }
}

/// The `components` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Components {
    /// Named schema definitions.
    #[serde(default)]
    pub schemas: IndexMap<String, Schema>,
    /// Named reusable parameters.
    #[serde(default)]
    pub parameters: IndexMap<String, Parameter>,
}

/// HTTP methods in the order [`PathItem::operations`] yields them.
pub const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// The operations available on a single path.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PathItem {
    /// `GET`
    pub get: Option<Operation>,
    /// `PUT`
    pub put: Option<Operation>,
    /// `POST`
    pub post: Option<Operation>,
    /// `DELETE`
    pub delete: Option<Operation>,
    /// `OPTIONS`
    pub options: Option<Operation>,
    /// `HEAD`
    pub head: Option<Operation>,
    /// `PATCH`
    pub patch: Option<Operation>,
    /// `TRACE`
    pub trace: Option<Operation>,
}

impl PathItem {
    /// Returns the operation for `method`, compared case-insensitively.
    pub fn operation(&self, method: &str) -> Option<&Operation> {
        match method.to_ascii_lowercase().as_str() {
            "get" => self.get.as_ref(),
            "put" => self.put.as_ref(),
            "post" => self.post.as_ref(),
            "delete" => self.delete.as_ref(),
            "options" => self.options.as_ref(),
            "head" => self.head.as_ref(),
            "patch" => self.patch.as_ref(),
            "trace" => self.trace.as_ref(),
            _ => None,
        }
    }

    /// Iterates the declared operations as `(method, operation)` pairs.
    pub fn operations(&self) -> impl Iterator<Item = (&'static str, &Operation)> + '_ {
        HTTP_METHODS
            .iter()
            .filter_map(move |method| self.operation(method).map(|op| (*method, op)))
    }
}

/// A single API operation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Unique operation identifier.
    pub operation_id: Option<String>,
    /// Short summary.
    pub summary: Option<String>,
    /// Longer description.
    pub description: Option<String>,
    /// Declared parameters, inline or by reference.
    #[serde(default)]
    pub parameters: Vec<ParameterOrRef>,
    /// Request body.
    pub request_body: Option<RequestBody>,
    /// Responses keyed by status code.
    #[serde(default)]
    pub responses: IndexMap<String, Response>,
}

/// A parameter given inline or as `$ref` into `#/components/parameters`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParameterOrRef {
    /// `{ $ref: ... }`
    Ref {
        /// The reference string.
        #[serde(rename = "$ref")]
        reference: String,
    },
    /// An inline parameter object.
    Item(Parameter),
}

/// Where a parameter is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// Query string.
    Query,
    /// Path template variable.
    Path,
    /// Request header.
    Header,
    /// Cookie.
    Cookie,
    /// Anything else (e.g. Swagger 2 `formData`).
    #[serde(other)]
    Other,
}

/// An operation parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Location.
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Whether the parameter is mandatory.
    #[serde(default)]
    pub required: bool,
    /// Human readable description.
    pub description: Option<String>,
    /// Type of the parameter value.
    pub schema: Option<Schema>,
}

/// A request body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RequestBody {
    /// Human readable description.
    pub description: Option<String>,
    /// Media types in declaration order.
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

/// A single response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Response {
    /// Human readable description.
    pub description: Option<String>,
    /// Media types in declaration order.
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

/// Schema holder for one media type.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MediaType {
    /// The payload schema.
    pub schema: Option<Schema>,
}

/// The `type` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    /// `file` (Swagger-style uploads).
    File,
    /// `number`
    Number,
    /// `integer`
    Integer,
    /// `string`
    String,
    /// `boolean`
    Boolean,
    /// `object`
    Object,
    /// `array`
    Array,
    /// Any value this crate cannot represent.
    #[serde(other)]
    Unknown,
}

/// A schema descriptor.
///
/// The same shape serves both inline schemas and the named definitions stored under
/// `#/components/schemas`; only `properties`, `required` and `description` matter for the latter.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Schema {
    /// `type`; anything that is not a single type name reads as [`SchemaType::Unknown`].
    #[serde(rename = "type", default, deserialize_with = "lenient_schema_type")]
    pub schema_type: Option<SchemaType>,
    /// `format`
    pub format: Option<String>,
    /// `items` (arrays).
    pub items: Option<Box<Schema>>,
    /// `$ref`
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    /// `properties`, in declaration order.
    pub properties: Option<IndexMap<String, Schema>>,
    /// `required`; anything but a list of names (e.g. Swagger's `required: true`) reads as empty.
    #[serde(default, deserialize_with = "lenient_required")]
    pub required: Vec<String>,
    /// `description`
    pub description: Option<String>,
}

/// A keyword value that either has the expected shape or is skipped.
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Valid(T),
    Invalid(IgnoredAny),
}

fn lenient_schema_type<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<SchemaType>, D::Error> {
    Ok(match Option::<Lenient<SchemaType>>::deserialize(deserializer)? {
        None => None,
        Some(Lenient::Valid(schema_type)) => Some(schema_type),
        Some(Lenient::Invalid(_)) => Some(SchemaType::Unknown),
    })
}

fn lenient_required<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Lenient::<Vec<String>>::deserialize(deserializer)? {
        Lenient::Valid(names) => names,
        Lenient::Invalid(_) => Vec::new(),
    })
}

impl Schema {
    /// Whether `name` is listed in `required`.
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

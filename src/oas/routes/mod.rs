#![deny(missing_docs)]

//! # Route Parsing
//!
//! Turns a single operation (path template + method) into a [`ParseResult`]: the four
//! top-level type names and every interface they need.
//!
//! Each of the four groups (path variables, query, request body, response body) is resolved
//! into its own collector; the collectors are then concatenated in that order and
//! deduplicated by name, first occurrence winning.

pub mod naming;

use crate::config::ParserOptions;
use crate::oas::document::{
    Components, OpenApiDocument, Operation, Parameter, ParameterLocation, ParameterOrRef, Schema,
    SchemaType,
};
use crate::oas::models::{Interface, Notice, ParseResult};
use crate::oas::resolver::SchemaResolver;
use crate::oas::routes::naming::{
    extract_path_variables, operation_base_name, type_name, BODY_SUFFIX, PATH_VAR_SUFFIX,
    QUERY_SUFFIX, RES_SUFFIX,
};
use std::collections::HashSet;

/// Media type that flags an operation as a form upload.
pub const MULTIPART_FORM_DATA: &str = "multipart/form-data";

/// Prefix of a reference into `#/components/parameters`.
pub const PARAMETER_REF_PREFIX: &str = "#/components/parameters/";

/// Parses the operation at `path` / `method`.
///
/// Returns `None` when the document has no such operation.
pub fn parse_operation(
    document: &OpenApiDocument,
    path: &str,
    method: &str,
    options: &ParserOptions,
) -> Option<ParseResult> {
    let operation = document.operation(path, method)?;
    Some(build_parse_result(document, path, method, operation, options))
}

/// Parses every operation of the document.
///
/// Paths come in declaration order; methods within a path in the order of
/// [`HTTP_METHODS`](crate::oas::document::HTTP_METHODS).
pub fn parse_document(document: &OpenApiDocument, options: &ParserOptions) -> Vec<ParseResult> {
    document
        .paths
        .iter()
        .flat_map(|(path, item)| {
            item.operations()
                .map(move |(method, operation)| (path.as_str(), method, operation))
        })
        .map(|(path, method, operation)| {
            build_parse_result(document, path, method, operation, options)
        })
        .collect()
}

fn build_parse_result(
    document: &OpenApiDocument,
    path: &str,
    method: &str,
    operation: &Operation,
    options: &ParserOptions,
) -> ParseResult {
    log::debug!("parsing {} {}", method.to_uppercase(), path);

    let definitions = document.definitions();
    let name = operation_base_name(operation.operation_id.as_deref(), method, path);
    let mut notices = Vec::new();

    let parameters = collect_parameters(operation, &document.components, &mut notices);
    let path_vars = extract_path_variables(path);

    // 1. Path variables
    let path_params: Vec<Parameter> = path_vars
        .iter()
        .map(|var| {
            parameters
                .iter()
                .find(|p| p.location == ParameterLocation::Path && p.name == *var)
                .cloned()
                .unwrap_or_else(|| implicit_path_parameter(var))
        })
        .collect();
    let mut path_resolver = SchemaResolver::new(definitions);
    let path_var_name = type_name(&name, PATH_VAR_SUFFIX);
    let path_var = path_resolver
        .resolve_parameters(&path_var_name, &path_params)
        .then_some(path_var_name);

    // 2. Query
    let query_params: Vec<Parameter> = parameters
        .iter()
        .filter(|p| p.location == ParameterLocation::Query && !path_vars.contains(&p.name))
        .cloned()
        .collect();
    let mut query_resolver = SchemaResolver::new(definitions);
    let query_name = type_name(&name, QUERY_SUFFIX);
    let query = query_resolver
        .resolve_parameters(&query_name, &query_params)
        .then_some(query_name);

    // 3. Request body
    let request_media = operation
        .request_body
        .as_ref()
        .and_then(|body| body.content.first());
    let is_form_data = request_media.is_some_and(|(media_type, _)| media_type == MULTIPART_FORM_DATA);
    let mut body_resolver = SchemaResolver::new(definitions);
    let body = request_media
        .and_then(|(_, media)| media.schema.as_ref())
        .and_then(|schema| {
            body_resolver.resolve_schema(
                schema,
                &type_name(&name, BODY_SUFFIX),
                options.mark_required,
            )
        });

    // 4. Response body
    let mut res_resolver = SchemaResolver::new(definitions);
    let res = operation
        .responses
        .get(&options.success_status)
        .and_then(|response| response.content.first())
        .and_then(|(_, media)| media.schema.as_ref())
        .and_then(|schema| {
            res_resolver.resolve_schema(schema, &type_name(&name, RES_SUFFIX), options.mark_required)
        });

    let mut interfaces = Vec::new();
    for resolver in [path_resolver, query_resolver, body_resolver, res_resolver] {
        let (group, group_notices) = resolver.into_parts();
        interfaces.extend(group);
        for notice in group_notices {
            if !notices.contains(&notice) {
                notices.push(notice);
            }
        }
    }

    ParseResult {
        comment: operation_comment(operation),
        name,
        is_form_data,
        path_var,
        query,
        body,
        res,
        interfaces: dedup_interfaces(interfaces),
        notices,
    }
}

/// Inline parameters plus `#/components/parameters` references resolved against `components`.
fn collect_parameters(
    operation: &Operation,
    components: &Components,
    notices: &mut Vec<Notice>,
) -> Vec<Parameter> {
    operation
        .parameters
        .iter()
        .filter_map(|param| match param {
            ParameterOrRef::Item(p) => Some(p.clone()),
            ParameterOrRef::Ref { reference } => {
                let resolved = reference
                    .strip_prefix(PARAMETER_REF_PREFIX)
                    .and_then(|name| components.parameters.get(name))
                    .cloned();
                if resolved.is_none() {
                    let notice = Notice::UnresolvedParameter {
                        reference: reference.clone(),
                    };
                    log::warn!("{}", notice);
                    notices.push(notice);
                }
                resolved
            }
        })
        .collect()
}

/// A template variable with no declared parameter is still a required string.
fn implicit_path_parameter(name: &str) -> Parameter {
    Parameter {
        name: name.to_string(),
        location: ParameterLocation::Path,
        required: true,
        description: None,
        schema: Some(Schema {
            schema_type: Some(SchemaType::String),
            ..Schema::default()
        }),
    }
}

/// `summary` and `description`, whichever are non-empty, joined by a comma.
fn operation_comment(operation: &Operation) -> String {
    [&operation.summary, &operation.description]
        .into_iter()
        .flatten()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

/// Keeps the first interface of each name.
fn dedup_interfaces(interfaces: Vec<Interface>) -> Vec<Interface> {
    let mut seen = HashSet::new();
    interfaces
        .into_iter()
        .filter(|interface| seen.insert(interface.name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(yaml: &str) -> Operation {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_operation_comment() {
        assert_eq!(
            operation_comment(&op("{ summary: Get pet, description: By id }")),
            "Get pet,By id"
        );
        assert_eq!(operation_comment(&op("{ description: Only this }")), "Only this");
        assert_eq!(operation_comment(&op("{ summary: '', description: '' }")), "");
    }

    #[test]
    fn test_dedup_keeps_first() {
        let make = |name: &str, description: &str| Interface {
            name: name.into(),
            fields: vec![],
            description: Some(description.into()),
        };
        let deduped = dedup_interfaces(vec![
            make("Pet", "first"),
            make("Owner", "only"),
            make("Pet", "second"),
        ]);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].description.as_deref(), Some("first"));
        assert_eq!(deduped[1].name, "Owner");
    }

    #[test]
    fn test_collect_parameters_resolves_refs() {
        let components: Components = serde_yaml::from_str(
            r#"
parameters:
  Limit: { name: limit, in: query, schema: { type: integer } }
"#,
        )
        .unwrap();
        let operation = op(r#"
parameters:
  - $ref: '#/components/parameters/Limit'
  - $ref: '#/components/parameters/Missing'
  - { name: q, in: query, schema: { type: string } }
"#);
        let mut notices = Vec::new();
        let params = collect_parameters(&operation, &components, &mut notices);
        let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["limit", "q"]);
        assert_eq!(
            notices,
            vec![Notice::UnresolvedParameter {
                reference: "#/components/parameters/Missing".into(),
            }]
        );
    }

    #[test]
    fn test_implicit_path_parameter() {
        let doc = OpenApiDocument::from_yaml_str(
            r#"
paths:
  /files/{name}:
    get:
      operationId: getFile
"#,
        )
        .unwrap();
        let result = parse_operation(&doc, "/files/{name}", "get", &ParserOptions::default())
            .unwrap();
        assert_eq!(result.path_var.as_deref(), Some("GetFilePathVar"));
        let field = &result.interface("GetFilePathVar").unwrap().fields[0];
        assert_eq!(field.name, "name");
        assert_eq!(field.ty.to_string(), "string");
        assert!(!field.optional);
    }
}

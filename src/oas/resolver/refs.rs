#![deny(missing_docs)]

//! # Reference Resolution
//!
//! The shared collector and the mutually recursive reference/property resolvers.
//!
//! An interface is registered *before* its own references are followed, and resolution of a
//! name already in the collector is a no-op. Together that makes cyclic definitions terminate
//! and keeps every name unique.
//!
//! Interfaces are inserted at the front, so a referrer always sits behind everything it pulls
//! in and the first interface registered ends up last.

use crate::oas::document::Schema;
use crate::oas::models::{Field, FieldType, Interface, Notice, SCHEMA_REF_PREFIX};
use crate::oas::resolver::types::field_type_of;
use indexmap::IndexMap;
use std::collections::VecDeque;

/// Extracts the definition name from a reference.
/// e.g. `#/components/schemas/User` -> `User`
pub fn reference_name(reference: &str) -> &str {
    reference
        .strip_prefix(SCHEMA_REF_PREFIX)
        .unwrap_or_else(|| reference.rsplit('/').next().unwrap_or(reference))
}

/// Accumulates interfaces and notices for one top-level type group.
///
/// Holds the read-only definitions table; every resolver method writes into the live
/// collector so the "already registered" check always sees in-progress state.
#[derive(Debug)]
pub struct SchemaResolver<'a> {
    definitions: &'a IndexMap<String, Schema>,
    interfaces: VecDeque<Interface>,
    notices: Vec<Notice>,
}

impl<'a> SchemaResolver<'a> {
    /// Creates an empty collector over `definitions`.
    pub fn new(definitions: &'a IndexMap<String, Schema>) -> Self {
        Self {
            definitions,
            interfaces: VecDeque::new(),
            notices: Vec::new(),
        }
    }

    /// Whether an interface called `name` has been registered.
    pub fn contains(&self, name: &str) -> bool {
        self.interfaces.iter().any(|i| i.name == name)
    }

    /// Registered interfaces, most recently registered first.
    pub fn interfaces(&self) -> impl Iterator<Item = &Interface> {
        self.interfaces.iter()
    }

    /// Notices recorded so far.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Name of the first interface registered (the back of the collector).
    pub fn root_name(&self) -> Option<&str> {
        self.interfaces.back().map(|i| i.name.as_str())
    }

    /// Consumes the collector.
    pub fn into_parts(self) -> (Vec<Interface>, Vec<Notice>) {
        (self.interfaces.into(), self.notices)
    }

    pub(crate) fn register(&mut self, interface: Interface) {
        log::debug!(
            "registering interface {} ({} fields)",
            interface.name,
            interface.fields.len()
        );
        self.interfaces.push_front(interface);
    }

    pub(crate) fn note(&mut self, notice: Notice) {
        if self.notices.contains(&notice) {
            return;
        }
        log::warn!("{}", notice);
        self.notices.push(notice);
    }

    /// Resolves `reference` into a registered interface.
    ///
    /// Does nothing if the name is already registered. A missing definition is recorded as
    /// [`Notice::UnresolvedReference`], one that yields no fields as [`Notice::EmptyDefinition`].
    pub fn resolve_reference(&mut self, reference: &str, mark_required: bool) {
        let name = reference_name(reference);
        if self.contains(name) {
            return;
        }

        let definitions = self.definitions;
        let Some(definition) = definitions.get(name) else {
            self.note(Notice::UnresolvedReference {
                reference: reference.to_string(),
            });
            return;
        };

        self.build_interface(name, reference, definition, mark_required);
        if !self.contains(name) {
            self.note(Notice::EmptyDefinition {
                reference: reference.to_string(),
            });
        }
    }

    /// Builds the interface `name` from `definition`'s properties and registers it.
    ///
    /// A definition without properties registers nothing, and neither does one whose
    /// properties were all dropped. Field optionality is
    /// `!mark_required || !definition.required.contains(field)`.
    pub fn resolve_properties(
        &mut self,
        name: &str,
        definition: Option<&Schema>,
        mark_required: bool,
    ) {
        if let Some(definition) = definition {
            self.build_interface(name, name, definition, mark_required);
        }
    }

    /// `owner` names the source of the definition in notices: the `$ref` when there is one,
    /// otherwise the interface name.
    fn build_interface(
        &mut self,
        name: &str,
        owner: &str,
        definition: &Schema,
        mark_required: bool,
    ) {
        let Some(properties) = &definition.properties else {
            return;
        };

        let mut fields = Vec::with_capacity(properties.len());
        for (key, property) in properties {
            match field_type_of(property) {
                Some(ty) => fields.push(Field {
                    name: key.clone(),
                    ty,
                    optional: !mark_required || !definition.is_required(key),
                    description: property.description.clone(),
                    format: property.format.clone(),
                }),
                None => self.note(Notice::IgnoredField {
                    field: key.clone(),
                    owner: owner.to_string(),
                }),
            }
        }

        if fields.is_empty() {
            return;
        }

        self.register(Interface {
            name: name.to_string(),
            fields,
            description: definition.description.clone(),
        });
        self.resolve_pending(name, mark_required);
    }

    /// Follows every pending reference of the registered interface `name` and rewrites the
    /// field to the resolved interface name, keeping its array suffix.
    ///
    /// A reference that registered nothing (missing or empty definition) stays as raw
    /// reference text; [`resolve_reference`](Self::resolve_reference) has noted why.
    pub(crate) fn resolve_pending(&mut self, name: &str, mark_required: bool) {
        let pending: Vec<(usize, String, String)> = match self.find(name) {
            Some(interface) => interface
                .fields
                .iter()
                .enumerate()
                .filter_map(|(idx, field)| match &field.ty {
                    FieldType::Reference { reference, suffix } => {
                        Some((idx, reference.clone(), suffix.clone()))
                    }
                    FieldType::Named(_) => None,
                })
                .collect(),
            None => return,
        };

        for (idx, reference, suffix) in pending {
            self.resolve_reference(&reference, mark_required);

            let target = reference_name(&reference);
            if !self.contains(target) {
                continue;
            }
            let resolved = FieldType::Named(format!("{}{}", target, suffix));
            if let Some(field) = self.find_mut(name).and_then(|i| i.fields.get_mut(idx)) {
                field.ty = resolved;
            }
        }
    }

    fn find(&self, name: &str) -> Option<&Interface> {
        self.interfaces.iter().find(|i| i.name == name)
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut Interface> {
        self.interfaces.iter_mut().find(|i| i.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::document::OpenApiDocument;

    const DEFS: &str = r#"
components:
  schemas:
    Pet:
      type: object
      description: A pet
      required: [name]
      properties:
        name: { type: string }
        owner: { $ref: '#/components/schemas/Owner' }
        tags:
          type: array
          items: { $ref: '#/components/schemas/Tag' }
        ghost: { $ref: '#/components/schemas/Ghost' }
        blob: { description: no type }
    Owner:
      type: object
      properties:
        pets:
          type: array
          items: { $ref: '#/components/schemas/Pet' }
    Tag:
      type: object
      properties:
        label: { type: string }
    Empty:
      type: object
"#;

    fn doc() -> OpenApiDocument {
        OpenApiDocument::from_yaml_str(DEFS).unwrap()
    }

    fn names(resolver: &SchemaResolver) -> Vec<String> {
        resolver.interfaces().map(|i| i.name.clone()).collect()
    }

    #[test]
    fn test_reference_name() {
        assert_eq!(reference_name("#/components/schemas/User"), "User");
        assert_eq!(reference_name("#/definitions/Legacy"), "Legacy");
        assert_eq!(reference_name("Bare"), "Bare");
    }

    #[test]
    fn test_resolve_graph_order_and_rewrite() {
        let doc = doc();
        let mut resolver = SchemaResolver::new(doc.definitions());
        resolver.resolve_reference("#/components/schemas/Pet", true);

        // Tag registered last, Pet (the root) sits at the back.
        assert_eq!(names(&resolver), vec!["Tag", "Owner", "Pet"]);
        assert_eq!(resolver.root_name(), Some("Pet"));

        let pet = resolver.find("Pet").unwrap();
        assert_eq!(pet.description.as_deref(), Some("A pet"));
        let types: Vec<String> = pet.fields.iter().map(|f| f.ty.to_string()).collect();
        assert_eq!(
            types,
            vec!["string", "Owner", "Tag[]", "#/components/schemas/Ghost"]
        );
        assert!(pet.fields[3].ty.is_reference());

        let owner = resolver.find("Owner").unwrap();
        assert_eq!(owner.fields[0].ty.to_string(), "Pet[]");
    }

    #[test]
    fn test_notices() {
        let doc = doc();
        let mut resolver = SchemaResolver::new(doc.definitions());
        resolver.resolve_reference("#/components/schemas/Pet", true);
        assert_eq!(
            resolver.notices(),
            &[
                Notice::IgnoredField {
                    field: "blob".into(),
                    owner: "#/components/schemas/Pet".into(),
                },
                Notice::UnresolvedReference {
                    reference: "#/components/schemas/Ghost".into(),
                },
            ]
        );
    }

    #[test]
    fn test_idempotent_resolution() {
        let doc = doc();
        let mut resolver = SchemaResolver::new(doc.definitions());
        for _ in 0..3 {
            resolver.resolve_reference("#/components/schemas/Owner", true);
            resolver.resolve_reference("#/components/schemas/Pet", true);
        }
        for name in ["Pet", "Owner", "Tag"] {
            assert_eq!(resolver.interfaces().filter(|i| i.name == name).count(), 1);
        }
    }

    #[test]
    fn test_optionality_law() {
        let doc = doc();
        let mut strict = SchemaResolver::new(doc.definitions());
        strict.resolve_reference("#/components/schemas/Pet", true);
        let pet = strict.find("Pet").unwrap();
        assert!(!pet.field("name").unwrap().optional);
        assert!(pet.field("owner").unwrap().optional);

        let mut loose = SchemaResolver::new(doc.definitions());
        loose.resolve_reference("#/components/schemas/Pet", false);
        let pet = loose.find("Pet").unwrap();
        assert!(pet.fields.iter().all(|f| f.optional));
    }

    #[test]
    fn test_missing_and_empty_definitions_register_nothing() {
        let doc = doc();
        let mut resolver = SchemaResolver::new(doc.definitions());
        resolver.resolve_reference("#/components/schemas/Nope", true);
        resolver.resolve_reference("#/components/schemas/Empty", true);
        resolver.resolve_properties("Inline", None, true);
        assert!(resolver.root_name().is_none());
        assert_eq!(
            resolver.notices(),
            &[
                Notice::UnresolvedReference {
                    reference: "#/components/schemas/Nope".into(),
                },
                Notice::EmptyDefinition {
                    reference: "#/components/schemas/Empty".into(),
                },
            ]
        );
    }

    #[test]
    fn test_field_referencing_empty_definition() {
        let doc = OpenApiDocument::from_yaml_str(
            r#"
components:
  schemas:
    Pet:
      type: object
      properties:
        name: { type: string }
        meta: { $ref: '#/components/schemas/Empty' }
    Empty:
      type: object
"#,
        )
        .unwrap();
        let mut resolver = SchemaResolver::new(doc.definitions());
        resolver.resolve_reference("#/components/schemas/Pet", true);

        let pet = resolver.find("Pet").unwrap();
        assert_eq!(
            pet.field("meta").unwrap().ty.to_string(),
            "#/components/schemas/Empty"
        );
        assert!(!resolver.contains("Empty"));
        assert_eq!(
            resolver.notices(),
            &[Notice::EmptyDefinition {
                reference: "#/components/schemas/Empty".into(),
            }]
        );
        assert_eq!(
            resolver.notices()[0].to_string(),
            "the reference #/components/schemas/Empty has no properties and is left unresolved"
        );
    }

    #[test]
    fn test_inline_owner_is_interface_name() {
        let doc = OpenApiDocument::default();
        let inline: Schema =
            serde_yaml::from_str("properties: { ok: { type: string }, blob: {} }").unwrap();
        let mut resolver = SchemaResolver::new(doc.definitions());
        resolver.resolve_properties("CreateBody", Some(&inline), true);
        assert_eq!(
            resolver.notices(),
            &[Notice::IgnoredField {
                field: "blob".into(),
                owner: "CreateBody".into(),
            }]
        );
    }
}

//! Descriptor types for entity schemas.
//!
//! `RawEntityDef` is the shape of an entity definition as written in schema
//! YAML. `EntityDescriptor` is the introspected, classified form consumed by
//! the graph walk and the synthesizers; it is immutable once built.

use serde::{Deserialize, Serialize};

/// Wrapper for entity YAML structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EntitySpec {
    pub entity: RawEntityDef,
}

/// Entity definition from YAML, before classification.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RawEntityDef {
    /// Entity simple name (PascalCase, e.g. "OrderItem")
    pub name: String,
    /// Package of the existing model class. Defaults to
    /// `{root_namespace}.model` when absent.
    #[serde(default)]
    pub namespace: Option<String>,
    /// Documentation string
    #[serde(default)]
    pub doc: Option<String>,
    /// Declared fields, in declaration order
    #[serde(default)]
    pub fields: Vec<RawFieldDef>,
}

/// Field definition in entity YAML.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RawFieldDef {
    /// Field name (camelCase)
    pub name: String,
    /// Declared type text (e.g. "Long", "Customer", "List<OrderItem>")
    #[serde(rename = "type")]
    pub declared_type: String,
    /// Documentation string
    #[serde(default)]
    pub doc: Option<String>,
}

/// Structural classification of a declared field type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Built-in value type, copied through unchanged.
    Scalar,
    /// Single reference to another entity.
    EntityRef { target: String },
    /// Ordered collection of entities (one-to-many relation).
    ListOfEntity { target: String },
    /// Keyed mapping with entity values; the key type stays verbatim.
    MapValueEntity { key_type: String, target: String },
    /// Collection of non-entity elements, passed through unchanged.
    /// Also the fallback for unsupported generic shapes.
    ScalarCollection,
}

impl FieldKind {
    /// The referenced entity identity, if this field points at one.
    pub fn target(&self) -> Option<&str> {
        match self {
            FieldKind::EntityRef { target }
            | FieldKind::ListOfEntity { target }
            | FieldKind::MapValueEntity { target, .. } => Some(target),
            FieldKind::Scalar | FieldKind::ScalarCollection => None,
        }
    }
}

/// A classified field of an introspected entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub declared_type: String,
    pub kind: FieldKind,
}

/// An introspected entity: identity, namespace and classified fields.
///
/// Created lazily on first reference during the graph walk and never
/// mutated afterward.
#[derive(Debug, Clone)]
pub struct EntityDescriptor {
    pub name: String,
    pub namespace: Option<String>,
    pub fields: Vec<FieldDescriptor>,
}

impl EntityDescriptor {
    /// Distinct entity identities referenced by this entity's fields,
    /// in field order.
    pub fn entity_targets(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for field in &self.fields {
            if let Some(target) = field.kind.target() {
                if !seen.contains(&target) {
                    seen.push(target);
                }
            }
        }
        seen
    }

    /// Package of the model class this descriptor mirrors.
    pub fn model_package(&self, root_namespace: &str) -> String {
        match &self.namespace {
            Some(ns) => ns.clone(),
            None => format!("{}.model", root_namespace),
        }
    }
}

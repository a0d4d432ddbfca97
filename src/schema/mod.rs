//! # Schema Model
//!
//! The business-object schema graph the print core reads and enhances: services,
//! entities with their fields and bound actions, and the schema-level marker that
//! records whether print artifacts were already synthesized.
//!
//! Definitions are keyed by their fully qualified name (for example
//! `CatalogService.Books`) and kept in a `BTreeMap`, so every walk over the
//! schema is deterministic. Fields keep their declaration order.

pub mod error;
pub mod tags;
pub mod value;

pub use error::SchemaError;
pub use tags::{FieldTag, Scope, ScopedTag, TagSet};
pub use value::{Record, Value};

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Schema graph with its definitions and load metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub definitions: BTreeMap<String, Definition>,
    #[serde(default)]
    pub meta: SchemaMeta,
}

/// Schema-level metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaMeta {
    /// Set once print artifacts have been synthesized
    #[serde(default)]
    pub print_enhanced: bool,
}

/// A named schema definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Definition {
    Service(Service),
    Entity(Entity),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Marks an entity as one of the synthesized lookup entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupRole {
    Queues,
    Files,
}

/// Reference to an action in an entity's identification list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRef {
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
    /// Receives a synthesized print action and lookup entities
    #[serde(default)]
    pub printable: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identification: Vec<ActionRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projection_of: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookup: Option<LookupRole>,
}

impl Entity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn printable(mut self) -> Self {
        self.printable = true;
        self
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.name == name)
    }

    /// Key field names in lexicographic order.
    ///
    /// This order is the contract of the positional `entityKeyN` parameters of
    /// the files lookup and must stay stable across runs.
    pub fn key_fields_sorted(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .fields
            .iter()
            .filter(|f| f.key)
            .map(|f| f.name.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }

    /// Content-bearing fields in declaration order
    pub fn binary_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.kind == FieldKind::Binary)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    String,
    Integer,
    Binary,
    Other,
}

/// An entity field or an action parameter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default)]
    pub key: bool,
    #[serde(default)]
    pub mandatory: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, JsonValue>,
    /// Field holding the file name of this content field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_disposition: Option<String>,
    /// Lookup entity offering the allowed values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_list: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Self::default()
        }
    }

    pub fn key(mut self) -> Self {
        self.key = true;
        self
    }

    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    pub fn annotate(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.annotations.insert(key.into(), value);
        self
    }

    /// Attach print tags as annotations
    pub fn tagged(mut self, tags: &TagSet) -> Self {
        self.annotations.extend(tags.to_annotations());
        self
    }

    pub fn with_content_disposition(mut self, field: impl Into<String>) -> Self {
        self.content_disposition = Some(field.into());
        self
    }

    pub fn with_value_list(mut self, entity: impl Into<String>) -> Self {
        self.value_list = Some(entity.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Decode this field's print tags
    pub fn tags(&self) -> Result<TagSet, SchemaError> {
        TagSet::decode(&self.name, &self.annotations)
    }
}

/// An action bound to an entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    #[serde(default)]
    pub params: Vec<Field>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, JsonValue>,
}

impl Action {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_param(mut self, param: Field) -> Self {
        self.params.push(param);
        self
    }

    pub fn annotate(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.annotations.insert(key.into(), value);
        self
    }

    pub fn param(&self, name: &str) -> Option<&Field> {
        self.params.iter().find(|p| p.name == name)
    }
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_service(mut self, name: impl Into<String>) -> Self {
        self.definitions
            .insert(name.into(), Definition::Service(Service::default()));
        self
    }

    pub fn with_entity(mut self, name: impl Into<String>, entity: Entity) -> Self {
        self.definitions.insert(name.into(), Definition::Entity(entity));
        self
    }

    pub fn is_enhanced(&self) -> bool {
        self.meta.print_enhanced
    }

    pub fn entity(&self, name: &str) -> Option<&Entity> {
        match self.definitions.get(name) {
            Some(Definition::Entity(entity)) => Some(entity),
            _ => None,
        }
    }

    pub fn entity_mut(&mut self, name: &str) -> Option<&mut Entity> {
        match self.definitions.get_mut(name) {
            Some(Definition::Entity(entity)) => Some(entity),
            _ => None,
        }
    }

    /// Entities with their qualified names, in name order
    pub fn entities(&self) -> impl Iterator<Item = (&str, &Entity)> {
        self.definitions.iter().filter_map(|(name, def)| match def {
            Definition::Entity(entity) => Some((name.as_str(), entity)),
            Definition::Service(_) => None,
        })
    }

    /// Declared service names, in name order
    pub fn service_names(&self) -> Vec<&str> {
        self.definitions
            .iter()
            .filter(|(_, def)| matches!(def, Definition::Service(_)))
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// Namespace part of a qualified name, or the name itself when unqualified
pub fn namespace_of(qualified: &str) -> &str {
    qualified
        .rsplit_once('.')
        .map_or(qualified, |(namespace, _)| namespace)
}

//! # Print Configuration Registry
//!
//! Name-keyed store of the scan results for every entity and action.
//!
//! ## Lifecycle
//!
//! The registry is populated once while the schema loads and is read on every
//! print request afterwards. It is an explicit object rather than process-wide
//! state: build it with `&mut self`, then share it as `Arc<PrintRegistry>`.
//! Nothing mutates it once shared, so concurrent lookups need no locking.
//!
//! Registering a key a second time overwrites the earlier entry; overall
//! idempotence comes from the schema-level enhancement marker, not from here.
//!
//! ## Usage
//!
//! ```rust
//! use print_core::registry::{ActionKey, PrintRegistry};
//! use print_core::scanner::{EntityPrintConfig, PrintFieldSet};
//!
//! let mut registry = PrintRegistry::new();
//! registry.register("CatalogService.Books", EntityPrintConfig::default());
//! registry.register_action(
//!     ActionKey::new("CatalogService.Books", "print"),
//!     PrintFieldSet::default(),
//! );
//!
//! assert!(registry.lookup_entity("CatalogService.Books").is_some());
//! assert_eq!(registry.stats().total_actions, 1);
//! ```

use crate::scanner::{
    ActionPrintConfig, ContentFieldSpec, EntityPrintConfig, PrintFieldSet, ScopedFieldSet,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Key of an action in the registry.
///
/// Actions are qualified by their owning entity since every printable entity
/// owns an action named `print`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActionKey {
    pub entity: String,
    pub action: String,
}

impl ActionKey {
    pub fn new(entity: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            action: action.into(),
        }
    }
}

impl std::fmt::Display for ActionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.entity, self.action)
    }
}

/// Registry statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryStats {
    pub total_entities: usize,
    pub total_actions: usize,
    /// Entities contributing at least one generic queue, copy or content field
    pub entities_with_generic_config: usize,
    /// Entities contributing at least one action-scoped field
    pub entities_with_action_config: usize,
}

/// Print configuration registry for entities and actions
#[derive(Debug, Clone, Default)]
pub struct PrintRegistry {
    entities: HashMap<String, EntityPrintConfig>,
    actions: HashMap<ActionKey, ActionPrintConfig>,
    parameters: HashMap<ActionKey, BTreeSet<String>>,
}

impl PrintRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the scan result of an entity
    pub fn register(&mut self, entity: impl Into<String>, config: EntityPrintConfig) {
        let entity = entity.into();
        debug!(entity = %entity, "Registering entity print configuration");
        self.entities.insert(entity, config);
    }

    /// Register the derived configuration of an action
    pub fn register_action(&mut self, key: ActionKey, config: ActionPrintConfig) {
        debug!(action = %key, "Registering action print configuration");
        self.actions.insert(key, config);
    }

    /// Record the parameter names of an action.
    ///
    /// Parameters hold caller-supplied values only, so the resolver never reads
    /// them from the persisted record.
    pub fn register_action_parameters<I, S>(&mut self, key: ActionKey, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameters
            .insert(key, names.into_iter().map(Into::into).collect());
    }

    pub fn action_parameters(&self, key: &ActionKey) -> Option<&BTreeSet<String>> {
        self.parameters.get(key)
    }

    pub fn lookup_entity(&self, entity: &str) -> Option<&EntityPrintConfig> {
        self.entities.get(entity)
    }

    pub fn lookup_action(&self, key: &ActionKey) -> Option<&ActionPrintConfig> {
        self.actions.get(key)
    }

    pub fn len(&self) -> usize {
        self.entities.len() + self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.actions.is_empty()
    }

    pub fn stats(&self) -> RegistryStats {
        let mut stats = RegistryStats {
            total_entities: self.entities.len(),
            total_actions: self.actions.len(),
            ..RegistryStats::default()
        };

        for config in self.entities.values() {
            if !config.generic.is_empty() {
                stats.entities_with_generic_config += 1;
            }
            if !config.action_specific.is_empty() {
                stats.entities_with_action_config += 1;
            }
        }

        stats
    }
}

/// Derive the configuration of `action` from its entity's action-scoped fields
/// and the tags on the action's own parameters.
///
/// Entity fields scoped to the action override parameter-level queue and copy
/// fields. Content fields are concatenated, parameters first, each in original
/// order.
pub fn derive_action_config(
    action: &str,
    entity_scoped: &ScopedFieldSet,
    params: &PrintFieldSet,
) -> ActionPrintConfig {
    let mut config = params.clone();

    if let Some(queue) = entity_scoped
        .queue_field
        .as_ref()
        .filter(|q| q.applies_to(action))
    {
        config.queue_field = Some(queue.field.clone());
    }

    if let Some(copies) = entity_scoped
        .copy_field
        .as_ref()
        .filter(|c| c.applies_to(action))
    {
        config.copy_field = Some(copies.field.clone());
    }

    config.content_fields.extend(
        entity_scoped
            .content_fields
            .iter()
            .filter(|c| c.applies_to(action))
            .map(|c| c.spec.clone()),
    );

    config
}

/// Content field names of an action config, in order
pub fn content_field_names(config: &ActionPrintConfig) -> Vec<&str> {
    config
        .content_fields
        .iter()
        .map(|spec: &ContentFieldSpec| spec.content_field.as_str())
        .collect()
}

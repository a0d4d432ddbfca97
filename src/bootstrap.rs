//! # Print Model Bootstrap
//!
//! Load-time pipeline run once before any print request is served:
//!
//! ```text
//! Schema ──enhance──► Schema' ──scan entities──► PrintRegistry
//!                         └────scan actions + derive──┘
//! ```
//!
//! The result is a [`PrintModel`] holding the final schema and the registry,
//! which is shared read-only with request handling afterwards.

use crate::config::EnhancerSettings;
use crate::constants::annotations;
use crate::enhancer::SchemaEnhancer;
use crate::logging::log_schema_operation;
use crate::registry::{derive_action_config, ActionKey, PrintRegistry};
use crate::scanner::{scan, ActionPrintConfig, PrintFieldSet};
use crate::schema::{Action, Schema, SchemaError};
use std::sync::Arc;
use tracing::{debug, info};

/// The enhanced schema together with its print registry
#[derive(Debug, Clone)]
pub struct PrintModel {
    schema: Schema,
    registry: Arc<PrintRegistry>,
}

impl PrintModel {
    /// Enhance `schema` and populate the registry from it
    pub fn load(schema: Schema, settings: &EnhancerSettings) -> Result<Self, SchemaError> {
        let schema = SchemaEnhancer::new(settings.clone()).enhance(schema)?;
        let registry = build_registry(&schema)?;

        let stats = registry.stats();
        info!(
            entities = stats.total_entities,
            actions = stats.total_actions,
            "Print model loaded"
        );

        Ok(Self {
            schema,
            registry: Arc::new(registry),
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn registry(&self) -> Arc<PrintRegistry> {
        Arc::clone(&self.registry)
    }

    pub fn into_parts(self) -> (Schema, Arc<PrintRegistry>) {
        (self.schema, self.registry)
    }
}

/// Scan every entity and bound action of `schema` into a fresh registry.
///
/// Synthesized lookup entities are skipped. Entities without any print tag are
/// not registered; their actions still are.
pub fn build_registry(schema: &Schema) -> Result<PrintRegistry, SchemaError> {
    let mut registry = PrintRegistry::new();

    for (name, entity) in schema.entities() {
        if entity.lookup.is_some() {
            continue;
        }

        let config = scan(&entity.fields)?;

        for action in &entity.actions {
            let params = scan(&action.params)?.generic;
            let derived = derive_action_config(&action.name, &config.action_specific, &params);

            if is_print_action(action) {
                validate_print_action(name, action, &config.generic, &derived)?;
            }

            debug!(
                entity = %name,
                action = %action.name,
                content_fields = derived.content_fields.len(),
                "Scanned action parameters"
            );
            let key = ActionKey::new(name, &action.name);
            registry.register_action_parameters(
                key.clone(),
                action.params.iter().map(|p| p.name.as_str()),
            );
            registry.register_action(key, derived);
        }

        if config.is_empty() {
            continue;
        }

        log_schema_operation(
            "register_entity",
            name,
            None,
            "success",
            Some(&format!(
                "{} generic / {} action-scoped content fields",
                config.generic.content_fields.len(),
                config.action_specific.content_fields.len()
            )),
        );
        registry.register(name, config);
    }

    Ok(registry)
}

fn is_print_action(action: &Action) -> bool {
    action
        .annotations
        .get(annotations::PRINT_ACTION)
        .is_some_and(|v| v.as_bool().unwrap_or(true))
}

// A print action needs a queue, a copy count and content from some bucket
fn validate_print_action(
    entity: &str,
    action: &Action,
    generic: &PrintFieldSet,
    derived: &ActionPrintConfig,
) -> Result<(), SchemaError> {
    let mut missing = Vec::new();

    if generic.queue_field.is_none() && derived.queue_field.is_none() {
        missing.push(annotations::QUEUE);
    }
    if generic.copy_field.is_none() && derived.copy_field.is_none() {
        missing.push(annotations::NUMBER_OF_COPIES);
    }
    if generic.content_fields.is_empty() && derived.content_fields.is_empty() {
        missing.push(annotations::FILE_CONTENT);
    }

    if missing.is_empty() {
        return Ok(());
    }

    log_schema_operation(
        "validate_print_action",
        entity,
        Some(&action.name),
        "failed",
        Some(&missing.join(", ")),
    );

    Err(SchemaError::MissingPrintTags {
        entity: entity.to_string(),
        action: action.name.clone(),
        missing,
    })
}

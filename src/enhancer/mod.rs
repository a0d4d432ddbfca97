//! # Schema Enhancer
//!
//! Synthesizes the print capability into the schema graph. For every printable
//! entity it adds:
//!
//! - a bound `print` action with a queue parameter, a copy-count parameter and,
//!   when the entity has more than one content field, a file-selector parameter
//! - a reference to that action in the entity's identification list
//! - a service-qualified queues lookup entity and, when needed, a files lookup
//!
//! Enhancement is idempotent: the schema carries a marker once enhanced and
//! later calls return it unchanged. Names and ordering are deterministic since
//! definitions are walked in name order.
//!
//! ## Usage
//!
//! ```rust
//! use print_core::enhancer::enhance;
//! use print_core::schema::{Entity, Field, FieldKind, Schema};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = Schema::new().with_service("CatalogService").with_entity(
//!     "CatalogService.Books",
//!     Entity::new()
//!         .printable()
//!         .with_field(Field::new("ID", FieldKind::Integer).key()),
//! );
//!
//! let enhanced = enhance(schema)?;
//! assert!(enhanced.entity("CatalogService.PrintServiceQueues").is_some());
//! assert_eq!(enhanced.clone(), enhance(enhanced)?);
//! # Ok(())
//! # }
//! ```

pub mod naming;
pub mod templates;

pub use naming::{best_matching_service, qualified};

use crate::config::EnhancerSettings;
use crate::constants::{annotations, synthesized, MAX_KEY_FIELDS};
use crate::schema::{
    namespace_of, Action, ActionRef, Definition, Entity, Field, FieldKind, FieldTag, Schema,
    SchemaError, Scope, TagSet,
};
use serde_json::json;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Enhance `schema` with default settings
pub fn enhance(schema: Schema) -> Result<Schema, SchemaError> {
    SchemaEnhancer::default().enhance(schema)
}

/// Synthesizes print actions and lookup entities
#[derive(Debug, Clone, Default)]
pub struct SchemaEnhancer {
    settings: EnhancerSettings,
}

/// What the enhancer derived for one printable entity
#[derive(Debug, Clone, PartialEq, Eq)]
struct PrintablePlan {
    entity: String,
    service: String,
    key_count: usize,
    queue_lookup: String,
    files_lookup: Option<String>,
}

impl SchemaEnhancer {
    pub fn new(settings: EnhancerSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &EnhancerSettings {
        &self.settings
    }

    // The files lookup addresses at most MAX_KEY_FIELDS keys whatever the settings say
    fn key_limit(&self) -> usize {
        self.settings.max_key_fields.min(MAX_KEY_FIELDS)
    }

    /// Enhance the schema; a no-op when it is already enhanced
    pub fn enhance(&self, mut schema: Schema) -> Result<Schema, SchemaError> {
        if schema.is_enhanced() {
            debug!("Schema already enhanced for printing, skipping");
            return Ok(schema);
        }

        let plans = self.plan(&schema)?;
        let mut lookups: BTreeMap<String, Entity> = BTreeMap::new();

        for plan in &plans {
            let action = self.print_action(plan);
            let action_ref = ActionRef {
                action: qualified(&plan.service, &self.settings.action_name),
                label: Some(synthesized::PRINT_LABEL.to_string()),
            };

            let entity = schema
                .entity_mut(&plan.entity)
                .ok_or_else(|| SchemaError::EntityNotFound {
                    entity: plan.entity.clone(),
                })?;
            entity.actions.retain(|a| a.name != action.name);
            entity.actions.push(action);
            entity.identification.push(action_ref);

            lookups
                .entry(plan.queue_lookup.clone())
                .or_insert_with(templates::queue_lookup);

            if let Some(files_lookup) = &plan.files_lookup {
                match lookups.entry(files_lookup.clone()) {
                    Entry::Vacant(slot) => {
                        slot.insert(templates::files_lookup(plan.key_count));
                    }
                    // entities of one service share the lookup; keep enough key parameters for all
                    Entry::Occupied(mut slot) => {
                        if templates::files_lookup_key_count(slot.get()) < plan.key_count {
                            slot.insert(templates::files_lookup(plan.key_count));
                        }
                    }
                }
            }

            info!(
                entity = %plan.entity,
                service = %plan.service,
                files_lookup = plan.files_lookup.is_some(),
                "Synthesized print action"
            );
        }

        for (name, lookup) in lookups {
            if schema.definitions.contains_key(&name) {
                warn!(definition = %name, "Definition already exists, keeping it instead of the print lookup");
                continue;
            }
            schema.definitions.insert(name, Definition::Entity(lookup));
        }

        schema.meta.print_enhanced = true;
        Ok(schema)
    }

    // Validate every printable entity and decide names before touching the schema
    fn plan(&self, schema: &Schema) -> Result<Vec<PrintablePlan>, SchemaError> {
        let services = schema.service_names();

        schema
            .entities()
            .filter(|(_, entity)| entity.printable && entity.lookup.is_none())
            .map(|(name, entity)| {
                let key_count = entity.key_fields_sorted().len();
                let max = self.key_limit();
                if key_count > max {
                    return Err(SchemaError::TooManyKeyFields {
                        entity: name.to_string(),
                        count: key_count,
                        max,
                    });
                }

                let service = best_matching_service(&services, name)
                    .unwrap_or_else(|| namespace_of(name))
                    .to_string();

                let files_lookup = (entity.binary_fields().count() > 1)
                    .then(|| qualified(&service, &self.settings.files_lookup_name));

                Ok(PrintablePlan {
                    entity: name.to_string(),
                    queue_lookup: qualified(&service, &self.settings.queue_lookup_name),
                    service,
                    key_count,
                    files_lookup,
                })
            })
            .collect()
    }

    fn print_action(&self, plan: &PrintablePlan) -> Action {
        let queue_tags = TagSet::new().with(
            FieldTag::QueueSource {
                value_list: Some(plan.queue_lookup.clone()),
            },
            Scope::Generic,
        );
        let copies_tags = TagSet::new().with(FieldTag::CopyCount, Scope::Generic);

        let mut action = Action::new(&self.settings.action_name)
            .annotate(annotations::PRINT_ACTION, json!(true))
            .with_param(
                Field::new(synthesized::QUEUE_PARAM, FieldKind::String)
                    .mandatory()
                    .with_value_list(&plan.queue_lookup)
                    .with_label(synthesized::QUEUE_LABEL)
                    .tagged(&queue_tags),
            )
            .with_param(
                Field::new(synthesized::COPIES_PARAM, FieldKind::Integer)
                    .with_default(i64::from(self.settings.default_copies))
                    .with_label(synthesized::COPIES_LABEL)
                    .tagged(&copies_tags),
            );

        if let Some(files_lookup) = &plan.files_lookup {
            let selector_tags = TagSet::new().with(FieldTag::FileSelector, Scope::Generic);
            action = action.with_param(
                Field::new(synthesized::FILE_SELECTOR_PARAM, FieldKind::String)
                    .with_value_list(files_lookup)
                    .with_label(synthesized::FILE_LABEL)
                    .tagged(&selector_tags),
            );
        }

        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::LookupRole;

    fn books(binary_fields: usize) -> Entity {
        let mut entity = Entity::new()
            .printable()
            .with_field(Field::new("ID", FieldKind::Integer).key());
        for n in 0..binary_fields {
            entity = entity.with_field(Field::new(format!("file{n}"), FieldKind::Binary));
        }
        entity
    }

    #[test]
    fn test_synthesizes_print_action_with_queue_and_copies() {
        let schema = Schema::new()
            .with_service("CatalogService")
            .with_entity("CatalogService.Books", books(1));

        let enhanced = enhance(schema).unwrap();
        let entity = enhanced.entity("CatalogService.Books").unwrap();
        let action = entity.action("print").expect("print action");

        let names: Vec<&str> = action.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["qnameID", "copies"]);

        let queue = action.param("qnameID").unwrap();
        assert!(queue.mandatory);
        assert_eq!(
            queue.value_list.as_deref(),
            Some("CatalogService.PrintServiceQueues")
        );
        assert!(queue.tags().unwrap().queue_source().is_some());

        let copies = action.param("copies").unwrap();
        assert_eq!(copies.default, Some(crate::schema::Value::Integer(1)));
        assert!(copies.tags().unwrap().copy_count().is_some());

        assert_eq!(
            entity.identification,
            vec![ActionRef {
                action: "CatalogService.print".to_string(),
                label: Some("{i18n>PRINT}".to_string()),
            }]
        );

        let queues = enhanced
            .entity("CatalogService.PrintServiceQueues")
            .expect("queue lookup");
        assert_eq!(queues.lookup, Some(LookupRole::Queues));
        assert!(enhanced
            .entity("CatalogService.PrintServiceFiles")
            .is_none());
        assert!(enhanced.is_enhanced());
    }

    #[test]
    fn test_multiple_content_fields_add_file_selector_and_files_lookup() {
        let schema = Schema::new()
            .with_service("CatalogService")
            .with_entity("CatalogService.Books", books(2));

        let enhanced = enhance(schema).unwrap();
        let action = enhanced
            .entity("CatalogService.Books")
            .unwrap()
            .action("print")
            .unwrap();

        let selector = action.param("fileName").expect("file selector");
        assert_eq!(
            selector.value_list.as_deref(),
            Some("CatalogService.PrintServiceFiles")
        );
        assert!(selector.tags().unwrap().file_selector().is_some());

        let files = enhanced
            .entity("CatalogService.PrintServiceFiles")
            .expect("files lookup");
        assert_eq!(templates::files_lookup_key_count(files), 1);
    }

    #[test]
    fn test_shared_files_lookup_keeps_largest_key_count() {
        let composite = books(2)
            .with_field(Field::new("region", FieldKind::String).key())
            .with_field(Field::new("year", FieldKind::Integer).key());
        let schema = Schema::new()
            .with_service("CatalogService")
            .with_entity("CatalogService.Books", books(2))
            .with_entity("CatalogService.Composite", composite);

        let enhanced = enhance(schema).unwrap();
        let files = enhanced.entity("CatalogService.PrintServiceFiles").unwrap();
        assert_eq!(templates::files_lookup_key_count(files), 3);
    }

    #[test]
    fn test_rejects_too_many_key_fields() {
        let mut entity = books(1);
        for n in 0..10 {
            entity = entity.with_field(Field::new(format!("k{n}"), FieldKind::String).key());
        }
        let schema = Schema::new()
            .with_service("Svc")
            .with_entity("Svc.Wide", entity);

        let err = enhance(schema).unwrap_err();
        assert_eq!(
            err,
            SchemaError::TooManyKeyFields {
                entity: "Svc.Wide".to_string(),
                count: 11,
                max: 10,
            }
        );
    }

    #[test]
    fn test_key_limit_setting_cannot_exceed_files_lookup() {
        let mut entity = books(2);
        for n in 0..11 {
            entity = entity.with_field(Field::new(format!("k{n:02}"), FieldKind::String).key());
        }
        let schema = Schema::new()
            .with_service("Svc")
            .with_entity("Svc.Wide", entity);
        let enhancer = SchemaEnhancer::new(EnhancerSettings {
            max_key_fields: 12,
            ..EnhancerSettings::default()
        });

        let err = enhancer.enhance(schema).unwrap_err();
        assert_eq!(
            err,
            SchemaError::TooManyKeyFields {
                entity: "Svc.Wide".to_string(),
                count: 12,
                max: MAX_KEY_FIELDS,
            }
        );
    }

    #[test]
    fn test_enhance_is_idempotent() {
        let schema = Schema::new()
            .with_service("CatalogService")
            .with_entity("CatalogService.Books", books(2));

        let once = enhance(schema).unwrap();
        let twice = enhance(once.clone()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_without_services_uses_entity_namespace() {
        let schema = Schema::new().with_entity("bookshop.Books", books(1));

        let enhanced = enhance(schema).unwrap();
        assert!(enhanced.entity("bookshop.PrintServiceQueues").is_some());
        assert_eq!(
            enhanced.entity("bookshop.Books").unwrap().identification[0].action,
            "bookshop.print"
        );
    }

    #[test]
    fn test_custom_settings_rename_artifacts() {
        let enhancer = SchemaEnhancer::new(EnhancerSettings {
            action_name: "printDocument".to_string(),
            queue_lookup_name: "Printers".to_string(),
            default_copies: 2,
            ..EnhancerSettings::default()
        });
        let schema = Schema::new()
            .with_service("Svc")
            .with_entity("Svc.Orders", books(1));

        let enhanced = enhancer.enhance(schema).unwrap();
        let action = enhanced
            .entity("Svc.Orders")
            .unwrap()
            .action("printDocument")
            .expect("renamed action");
        assert_eq!(
            action.param("copies").unwrap().default,
            Some(crate::schema::Value::Integer(2))
        );
        assert!(enhanced.entity("Svc.Printers").is_some());
    }
}

//! Shared templates of the synthesized lookup entities.
//!
//! Every printable entity gets a service-qualified copy of the queues template;
//! entities with more than one content field also get a copy of the files
//! template, pruned to the number of key fields the entity actually declares.

use crate::constants::{synthesized, MAX_KEY_FIELDS};
use crate::schema::{Entity, Field, FieldKind, LookupRole};

/// Template listing the print queues offered by the printing service
pub fn queue_template() -> Entity {
    Entity::new()
        .with_field(
            Field::new("ID", FieldKind::String)
                .key()
                .with_label("{i18n>ID}"),
        )
        .with_field(Field::new("description", FieldKind::String).with_label("{i18n>DESCRIPTION}"))
}

/// Template listing the content fields of one record.
///
/// The record is addressed by its entity name plus up to ten positional key
/// values `entityKey1..entityKey10`, assigned in sorted key-name order.
pub fn files_template() -> Entity {
    let mut entity = Entity::new().with_field(Field::new("entity", FieldKind::String).key());

    for n in 1..=MAX_KEY_FIELDS {
        entity = entity.with_field(Field::new(entity_key_param(n), FieldKind::String).key());
    }

    entity
        .with_field(Field::new("property", FieldKind::String).key())
        .with_field(Field::new("fileName", FieldKind::String))
        .with_field(Field::new("label", FieldKind::String))
}

/// Name of the n-th positional key parameter, starting at 1
pub fn entity_key_param(n: usize) -> String {
    format!("{}{n}", synthesized::ENTITY_KEY_PREFIX)
}

/// Position of a positional key parameter, if `name` is one
pub fn entity_key_position(name: &str) -> Option<usize> {
    name.strip_prefix(synthesized::ENTITY_KEY_PREFIX)
        .and_then(|n| n.parse().ok())
}

/// Service-level copy of the queues template
pub fn queue_lookup() -> Entity {
    Entity {
        projection_of: Some(synthesized::QUEUE_TEMPLATE.to_string()),
        lookup: Some(LookupRole::Queues),
        ..queue_template()
    }
}

/// Service-level copy of the files template keeping `key_count` key parameters
pub fn files_lookup(key_count: usize) -> Entity {
    let mut entity = Entity {
        projection_of: Some(synthesized::FILES_TEMPLATE.to_string()),
        lookup: Some(LookupRole::Files),
        ..files_template()
    };

    entity
        .fields
        .retain(|f| entity_key_position(&f.name).map_or(true, |n| n <= key_count));

    entity
}

/// Number of positional key parameters a files lookup keeps
pub fn files_lookup_key_count(entity: &Entity) -> usize {
    entity
        .fields
        .iter()
        .filter(|f| entity_key_position(&f.name).is_some())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_template_has_all_key_params() {
        let template = files_template();
        assert_eq!(files_lookup_key_count(&template), MAX_KEY_FIELDS);
        assert!(template.field("entityKey10").is_some());
        assert!(template.field("property").unwrap().key);
    }

    #[test]
    fn test_files_lookup_prunes_unused_key_params() {
        let lookup = files_lookup(2);
        let names: Vec<&str> = lookup.fields.iter().map(|f| f.name.as_str()).collect();

        assert_eq!(
            names,
            vec!["entity", "entityKey1", "entityKey2", "property", "fileName", "label"]
        );
        assert_eq!(lookup.lookup, Some(LookupRole::Files));
    }

    #[test]
    fn test_entity_key_position() {
        assert_eq!(entity_key_position("entityKey7"), Some(7));
        assert_eq!(entity_key_position("entity"), None);
        assert_eq!(entity_key_position("property"), None);
    }
}

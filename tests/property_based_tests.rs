mod common;

use common::strategies::*;
use print_core::bootstrap::build_registry;
use print_core::registry::{content_field_names, derive_action_config, ActionKey, PrintRegistry};
use print_core::scanner::{scan, PrintFieldSet};
use print_core::schema::{Action, Entity, Schema};
use print_core::{enhance, PrintRequest, PrintResolver};
use proptest::prelude::*;
use std::sync::Arc;

proptest! {
    /// Property: no field lands in both the generic and the action-specific bucket
    #[test]
    fn scan_buckets_are_disjoint(fields in tagged_fields_strategy()) {
        let buckets = scan(&fields).unwrap();
        let scoped = &buckets.action_specific;

        if let Some(queue) = &scoped.queue_field {
            prop_assert!(buckets.generic.queue_field.as_deref() != Some(queue.field.as_str()));
        }
        if let Some(copies) = &scoped.copy_field {
            prop_assert!(buckets.generic.copy_field.as_deref() != Some(copies.field.as_str()));
        }
        for content in &scoped.content_fields {
            let in_generic = buckets
                .generic
                .content_fields
                .iter()
                .any(|c| c.content_field == content.spec.content_field);
            prop_assert!(!in_generic, "{} is in both buckets", content.spec.content_field);
        }
    }

    /// Property: an action's content fields are an ordered subset of the entity's scoped ones
    #[test]
    fn action_content_is_ordered_subset(fields in tagged_fields_strategy(), action in action_strategy()) {
        let entity = scan(&fields).unwrap();
        let derived = derive_action_config(&action, &entity.action_specific, &PrintFieldSet::default());

        let scoped: Vec<&str> = entity
            .action_specific
            .content_fields
            .iter()
            .map(|c| c.spec.content_field.as_str())
            .collect();
        let mut remaining = scoped.iter();
        for name in content_field_names(&derived) {
            prop_assert!(remaining.any(|s| *s == name), "{} out of order or missing", name);
        }
    }

    /// Property: enhancing twice equals enhancing once
    #[test]
    fn enhance_is_idempotent(schema in schema_strategy()) {
        let once = enhance(schema).unwrap();
        let twice = enhance(once.clone()).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// Property: loading registers every print action or names the printable entity it rejects
    #[test]
    fn enhanced_schemas_build_registries(schema in schema_strategy()) {
        let enhanced = enhance(schema).unwrap();
        let printable: Vec<&str> = enhanced
            .entities()
            .filter(|(_, entity)| entity.printable)
            .map(|(name, _)| name)
            .collect();

        // printable entities without content tags are rejected at load
        match build_registry(&enhanced) {
            Ok(registry) => {
                for name in printable {
                    prop_assert!(registry.lookup_action(&ActionKey::new(name, "print")).is_some());
                }
            }
            Err(err) => prop_assert!(err.entity().is_some_and(|e| printable.contains(&e))),
        }
    }

    /// Property: resolving the same request against the same record gives the same result
    #[test]
    fn resolve_is_deterministic(
        fields in tagged_fields_strategy(),
        action in action_strategy(),
        record in record_strategy(),
        params in record_strategy(),
    ) {
        let schema = Schema::new().with_entity(
            "Svc.Docs",
            Entity { fields, actions: vec![Action::new(action.clone())], ..Entity::default() },
        );
        let resolver = PrintResolver::new(Arc::new(
            build_registry(&schema).unwrap_or_else(|_| PrintRegistry::new()),
        ));
        let request = PrintRequest { params, ..PrintRequest::new("Svc.Docs", action) };

        let first = resolver.resolve_with_record(&request, &record);
        let second = resolver.resolve_with_record(&request, &record);

        match (first, second) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
            (Err(a), Err(b)) => prop_assert_eq!(a.kind(), b.kind()),
            (a, b) => prop_assert!(false, "diverging results: {:?} vs {:?}", a, b),
        }
    }
}

#[cfg(test)]
mod normalization_invariants {
    use print_core::resolver::{normalize_main_document, PrintDocument};

    #[test]
    fn test_single_document_becomes_main() {
        let mut documents = vec![PrintDocument {
            field: "doc".to_string(),
            file_name: "doc.pdf".to_string(),
            content: b"ABC".to_vec(),
            is_main_document: false,
        }];

        normalize_main_document(&mut documents).unwrap();

        assert!(documents[0].is_main_document);
    }
}

use print_core::schema::{
    Entity, Field, FieldKind, FieldTag, Record, Schema, Scope, TagSet, Value,
};
use proptest::prelude::*;
use proptest::sample::subsequence;

/// Action names tags may be scoped to
pub const ACTIONS: &[&str] = &["archive", "print", "releaseInvoice"];

/// Strategy for a tag scope: generic or a non-empty subset of [`ACTIONS`]
pub fn scope_strategy() -> impl Strategy<Value = Scope> {
    prop_oneof![
        Just(Scope::Generic),
        subsequence(ACTIONS.to_vec(), 1..=ACTIONS.len()).prop_map(Scope::actions),
    ]
}

/// Strategy for an arbitrary tag set; content tags always name `<field>Name`
pub fn tag_set_strategy(field: String) -> impl Strategy<Value = TagSet> {
    (
        prop::option::of(scope_strategy()),
        prop::option::of(scope_strategy()),
        prop::option::of(scope_strategy()),
        prop::option::of(scope_strategy()),
    )
        .prop_map(move |(queue, copies, content, main)| {
            let mut tags = TagSet::new();
            if let Some(scope) = queue {
                tags.insert(FieldTag::QueueSource { value_list: None }, scope);
            }
            if let Some(scope) = copies {
                tags.insert(FieldTag::CopyCount, scope);
            }
            if let Some(scope) = content {
                tags.insert(
                    FieldTag::FileContent {
                        file_name_field: Some(format!("{field}Name")),
                    },
                    scope,
                );
                if let Some(main_scope) = main {
                    tags.insert(FieldTag::MainDocument, main_scope);
                }
            }
            tags
        })
}

/// Strategy for the fields of an entity, named `f0..fN` in order
pub fn tagged_fields_strategy() -> impl Strategy<Value = Vec<Field>> {
    (0usize..8).prop_flat_map(|count| {
        (0..count)
            .map(|i| {
                let name = format!("f{i}");
                tag_set_strategy(name.clone())
                    .prop_map(move |tags| Field::new(name.clone(), FieldKind::Binary).tagged(&tags))
            })
            .collect::<Vec<_>>()
    })
}

/// Strategy for an action name out of [`ACTIONS`]
pub fn action_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(ACTIONS.to_vec()).prop_map(str::to_string)
}

/// Strategy for a printable or plain entity with up to ten keys
pub fn entity_strategy() -> impl Strategy<Value = Entity> {
    (any::<bool>(), 0usize..=10, 0usize..4).prop_map(|(printable, keys, binaries)| {
        let mut entity = Entity::new();
        entity.printable = printable;
        for n in 0..keys {
            entity = entity.with_field(Field::new(format!("key{n}"), FieldKind::String).key());
        }
        for n in 0..binaries {
            entity = entity
                .with_field(Field::new(format!("file{n}"), FieldKind::Binary).with_content_disposition(format!("file{n}Name")))
                .with_field(Field::new(format!("file{n}Name"), FieldKind::String));
        }
        entity
    })
}

/// Strategy for a schema of up to two services and four entities
pub fn schema_strategy() -> impl Strategy<Value = Schema> {
    (
        prop::collection::btree_set("[A-Z][a-z]{2,8}Service", 0..=2),
        prop::collection::vec(("[A-Z][a-z]{2,8}", entity_strategy()), 0..4),
        prop::sample::select(vec!["CatalogService", "AdminService"]),
    )
        .prop_map(|(services, entities, namespace)| {
            let mut schema = Schema::new();
            for service in services {
                schema = schema.with_service(service);
            }
            for (name, entity) in entities {
                schema = schema.with_entity(format!("{namespace}.{name}"), entity);
            }
            schema
        })
}

/// Strategy for a record of text and integer values over `f0..f7` and their names
pub fn record_strategy() -> impl Strategy<Value = Record> {
    let value = prop_oneof![
        Just(Value::Null),
        (0i64..4).prop_map(Value::Integer),
        "[a-z]{0,6}".prop_map(Value::from),
    ];
    prop::collection::btree_map(
        prop::sample::select(vec![
            "f0", "f1", "f2", "f3", "f0Name", "f1Name", "f2Name", "f3Name",
        ])
        .prop_map(str::to_string),
        value,
        0..8,
    )
}

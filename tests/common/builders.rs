//! Schema fixtures shared by the integration tests.

use print_core::bootstrap::build_registry;
use print_core::schema::{
    Action, Entity, Field, FieldKind, FieldTag, Record, Schema, Scope, TagSet, Value,
};
use print_core::{PrintRegistry, PrintRequest};
use std::sync::Arc;

pub const SERVICE: &str = "InvoiceService";
pub const INVOICES: &str = "InvoiceService.Invoices";
pub const RELEASE: &str = "releaseInvoice";

pub fn queue_tag(scope: Scope) -> TagSet {
    TagSet::new().with(
        FieldTag::QueueSource {
            value_list: Some("InvoiceService.PrintServiceQueues".to_string()),
        },
        scope,
    )
}

pub fn copies_tag(scope: Scope) -> TagSet {
    TagSet::new().with(FieldTag::CopyCount, scope)
}

pub fn content_tag(file_name_field: &str, main_document: bool) -> TagSet {
    let tags = TagSet::new().with(
        FieldTag::FileContent {
            file_name_field: Some(file_name_field.to_string()),
        },
        Scope::Generic,
    );
    if main_document {
        tags.with(FieldTag::MainDocument, Scope::Generic)
    } else {
        tags
    }
}

/// Builder for an invoice entity with generic print tags
#[derive(Debug, Clone)]
pub struct InvoiceBuilder {
    entity: Entity,
}

impl InvoiceBuilder {
    /// `ID` key, generic queue field `q`, generic copy field `c`
    pub fn new() -> Self {
        Self {
            entity: Entity::new()
                .with_field(Field::new("ID", FieldKind::Integer).key())
                .with_field(Field::new("q", FieldKind::String).tagged(&queue_tag(Scope::Generic)))
                .with_field(Field::new("c", FieldKind::Integer).tagged(&copies_tag(Scope::Generic)))
                .with_action(Action::new(RELEASE)),
        }
    }

    pub fn with_content(mut self, name: &str, main_document: bool) -> Self {
        let file_name = format!("{name}Name");
        self.entity = self
            .entity
            .with_field(Field::new(name, FieldKind::Binary).tagged(&content_tag(&file_name, main_document)))
            .with_field(Field::new(file_name, FieldKind::String));
        self
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.entity = self.entity.with_field(field);
        self
    }

    /// Add a parameter to the `releaseInvoice` action
    pub fn with_release_param(mut self, param: Field) -> Self {
        if let Some(action) = self.entity.actions.iter_mut().find(|a| a.name == RELEASE) {
            action.params.push(param);
        }
        self
    }

    pub fn build(self) -> Entity {
        self.entity
    }

    pub fn schema(self) -> Schema {
        Schema::new()
            .with_service(SERVICE)
            .with_entity(INVOICES, self.build())
    }

    pub fn registry(self) -> Arc<PrintRegistry> {
        Arc::new(build_registry(&self.schema()).expect("registry should build"))
    }
}

impl Default for InvoiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn release_request() -> PrintRequest {
    PrintRequest::new(INVOICES, RELEASE).with_key("ID", 42)
}

pub fn record(entries: &[(&str, Value)]) -> Record {
    entries
        .iter()
        .map(|(name, value)| ((*name).to_string(), value.clone()))
        .collect()
}

/// Persisted values of the scenario invoice with one `doc` content field
pub fn scenario_record() -> Record {
    record(&[
        ("ID", Value::Integer(42)),
        ("q", Value::from("OFFICE_01")),
        ("c", Value::Integer(2)),
        ("doc", Value::from(b"ABC".as_slice())),
        ("docName", Value::from("doc.pdf")),
    ])
}

/// A printable entity with `count` key fields named `k01..`
pub fn entity_with_keys(count: usize) -> Entity {
    (1..=count).fold(Entity::new().printable(), |entity, n| {
        entity.with_field(Field::new(format!("k{n:02}"), FieldKind::String).key())
    })
}

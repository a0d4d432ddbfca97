//! # Metadata Scanner
//!
//! Walks the fields of one entity (or the parameters of one action) and sorts
//! every print-tagged field into the generic bucket or the action-specific
//! bucket.
//!
//! Scanning is pure: it records what it finds and raises no error for missing
//! queue or copy tags, since an entity may legitimately have none. The only
//! failure is a malformed annotation. Callers insert the result into the
//! [`PrintRegistry`](crate::registry::PrintRegistry).

use crate::schema::{Field, FieldTag, Scope, SchemaError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A content field together with the field holding its file name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentFieldSpec {
    pub content_field: String,
    /// Unset when neither the tag nor the field's content disposition names one
    pub file_name_field: Option<String>,
    pub is_main_document: bool,
}

impl ContentFieldSpec {
    pub fn new(content_field: impl Into<String>, file_name_field: impl Into<String>) -> Self {
        Self {
            content_field: content_field.into(),
            file_name_field: Some(file_name_field.into()),
            is_main_document: false,
        }
    }

    pub fn main_document(mut self) -> Self {
        self.is_main_document = true;
        self
    }
}

/// Print-relevant fields usable without action scoping.
///
/// Used for an entity's generic configuration and, after derivation, for the
/// configuration of a single action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintFieldSet {
    pub queue_field: Option<String>,
    pub copy_field: Option<String>,
    pub content_fields: Vec<ContentFieldSpec>,
    /// Parameter selecting one content field out of several
    pub file_selector: Option<String>,
}

impl PrintFieldSet {
    pub fn is_empty(&self) -> bool {
        self.queue_field.is_none()
            && self.copy_field.is_none()
            && self.content_fields.is_empty()
            && self.file_selector.is_none()
    }

    /// Every field name this set reads, content and file-name fields included
    pub fn referenced_fields(&self) -> impl Iterator<Item = &str> {
        self.queue_field
            .iter()
            .chain(self.copy_field.iter())
            .map(String::as_str)
            .chain(self.content_fields.iter().flat_map(|spec| {
                std::iter::once(spec.content_field.as_str())
                    .chain(spec.file_name_field.as_deref())
            }))
    }
}

/// Configuration of one action, derived from its entity and its own parameters
pub type ActionPrintConfig = PrintFieldSet;

/// A field restricted to an explicit list of actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopedField {
    pub field: String,
    pub used_in_actions: BTreeSet<String>,
}

impl ScopedField {
    pub fn applies_to(&self, action: &str) -> bool {
        self.used_in_actions.contains(action)
    }
}

/// A content field restricted to an explicit list of actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopedContentField {
    pub spec: ContentFieldSpec,
    pub used_in_actions: BTreeSet<String>,
}

impl ScopedContentField {
    pub fn applies_to(&self, action: &str) -> bool {
        self.used_in_actions.contains(action)
    }
}

/// Print-relevant fields restricted to explicit actions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopedFieldSet {
    pub queue_field: Option<ScopedField>,
    pub copy_field: Option<ScopedField>,
    pub content_fields: Vec<ScopedContentField>,
}

impl ScopedFieldSet {
    pub fn is_empty(&self) -> bool {
        self.queue_field.is_none() && self.copy_field.is_none() && self.content_fields.is_empty()
    }
}

/// Scan result for one entity: the generic and the action-specific bucket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityPrintConfig {
    pub generic: PrintFieldSet,
    pub action_specific: ScopedFieldSet,
}

impl EntityPrintConfig {
    pub fn is_empty(&self) -> bool {
        self.generic.is_empty() && self.action_specific.is_empty()
    }
}

/// Classify the print-tagged fields of an entity or action, in declaration order.
///
/// When more than one field carries the same queue or copy tag scope, the last
/// one wins.
pub fn scan(fields: &[Field]) -> Result<EntityPrintConfig, SchemaError> {
    let mut buckets = EntityPrintConfig::default();

    for field in fields {
        let tags = field.tags()?;
        if tags.is_empty() {
            continue;
        }

        if let Some(queue) = tags.queue_source() {
            match &queue.scope {
                Scope::Generic => buckets.generic.queue_field = Some(field.name.clone()),
                Scope::Actions(actions) => {
                    buckets.action_specific.queue_field = Some(ScopedField {
                        field: field.name.clone(),
                        used_in_actions: actions.clone(),
                    })
                }
            }
        }

        if let Some(copies) = tags.copy_count() {
            match &copies.scope {
                Scope::Generic => buckets.generic.copy_field = Some(field.name.clone()),
                Scope::Actions(actions) => {
                    buckets.action_specific.copy_field = Some(ScopedField {
                        field: field.name.clone(),
                        used_in_actions: actions.clone(),
                    })
                }
            }
        }

        if let Some(content) = tags.file_content() {
            let FieldTag::FileContent { file_name_field } = &content.tag else {
                continue;
            };

            // main document marker only counts when scoped the same way as the content
            let is_main_document = tags
                .main_document()
                .is_some_and(|main| main.scope.is_generic() == content.scope.is_generic());

            let spec = ContentFieldSpec {
                content_field: field.name.clone(),
                file_name_field: file_name_field
                    .clone()
                    .or_else(|| field.content_disposition.clone()),
                is_main_document,
            };

            match &content.scope {
                Scope::Generic => buckets.generic.content_fields.push(spec),
                Scope::Actions(actions) => {
                    buckets
                        .action_specific
                        .content_fields
                        .push(ScopedContentField {
                            spec,
                            used_in_actions: actions.clone(),
                        })
                }
            }
        }

        if tags.file_selector().is_some() {
            buckets.generic.file_selector = Some(field.name.clone());
        }
    }

    Ok(buckets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::annotations as ann;
    use crate::schema::{FieldKind, TagSet};
    use serde_json::json;

    fn invoice_fields() -> Vec<Field> {
        vec![
            Field::new("ID", FieldKind::String).key(),
            Field::new("qname", FieldKind::String)
                .annotate(ann::QUEUE_SOURCE_ENTITY, json!("Queues"))
                .annotate(ann::QUEUE_USED_IN_ACTION, json!(["releaseInvoice"])),
            Field::new("numberOfCopies", FieldKind::Integer)
                .annotate(ann::NUMBER_OF_COPIES, json!(true))
                .annotate(ann::NUMBER_OF_COPIES_USED_IN_ACTION, json!(["releaseInvoice"])),
            Field::new("invoice", FieldKind::Binary)
                .annotate(ann::FILE_CONTENT_FILE_NAME_FIELD, json!("fileName"))
                .annotate(ann::FILE_CONTENT_USED_IN_ACTION, json!(["releaseInvoice"])),
            Field::new("attachment", FieldKind::Binary)
                .annotate(ann::FILE_CONTENT_FILE_NAME_FIELD, json!("attachmentName"))
                .annotate(ann::FILE_CONTENT_USED_IN_ACTION, json!(["releaseInvoice"]))
                .annotate(ann::MAIN_DOCUMENT, json!(true))
                .annotate(ann::MAIN_DOCUMENT_USED_IN_ACTION, json!(["releaseInvoice"])),
            Field::new("fileName", FieldKind::String),
        ]
    }

    #[test]
    fn test_action_specific_fields_land_in_scoped_bucket() {
        let buckets = scan(&invoice_fields()).unwrap();

        assert!(buckets.generic.is_empty());
        let queue = buckets.action_specific.queue_field.as_ref().unwrap();
        assert_eq!(queue.field, "qname");
        assert!(queue.applies_to("releaseInvoice"));
        assert_eq!(
            buckets.action_specific.copy_field.as_ref().unwrap().field,
            "numberOfCopies"
        );

        let contents: Vec<_> = buckets
            .action_specific
            .content_fields
            .iter()
            .map(|c| (c.spec.content_field.as_str(), c.spec.is_main_document))
            .collect();
        assert_eq!(contents, vec![("invoice", false), ("attachment", true)]);
    }

    #[test]
    fn test_generic_fields_land_in_generic_bucket() {
        let fields = vec![
            Field::new("qName", FieldKind::String).annotate(ann::QUEUE_SOURCE_ENTITY, json!("Queues")),
            Field::new("numberOfCopies", FieldKind::Integer)
                .annotate(ann::NUMBER_OF_COPIES, json!(true)),
            Field::new("summary", FieldKind::Binary)
                .annotate(ann::FILE_CONTENT, json!(true))
                .with_content_disposition("summaryName"),
            Field::new("cover", FieldKind::Binary)
                .annotate(ann::FILE_CONTENT_FILE_NAME_FIELD, json!("coverName"))
                .annotate(ann::MAIN_DOCUMENT, json!(true)),
        ];

        let buckets = scan(&fields).unwrap();

        assert!(buckets.action_specific.is_empty());
        assert_eq!(buckets.generic.queue_field.as_deref(), Some("qName"));
        assert_eq!(buckets.generic.copy_field.as_deref(), Some("numberOfCopies"));
        assert_eq!(
            buckets.generic.content_fields,
            vec![
                ContentFieldSpec::new("summary", "summaryName"),
                ContentFieldSpec::new("cover", "coverName").main_document(),
            ]
        );
    }

    #[test]
    fn test_content_without_file_name_stays_unset() {
        let fields = vec![Field::new("blob", FieldKind::Binary).annotate(ann::FILE_CONTENT, json!(true))];

        let buckets = scan(&fields).unwrap();
        assert_eq!(buckets.generic.content_fields[0].file_name_field, None);
    }

    #[test]
    fn test_mismatched_main_document_scope_is_ignored() {
        let fields = vec![Field::new("doc", FieldKind::Binary)
            .annotate(ann::FILE_CONTENT_FILE_NAME_FIELD, json!("docName"))
            .annotate(ann::MAIN_DOCUMENT, json!(true))
            .annotate(ann::MAIN_DOCUMENT_USED_IN_ACTION, json!("release"))];

        let buckets = scan(&fields).unwrap();
        assert!(!buckets.generic.content_fields[0].is_main_document);
    }

    #[test]
    fn test_last_scoped_queue_field_wins() {
        let scoped = TagSet::new().with(
            FieldTag::QueueSource { value_list: None },
            Scope::actions(["release"]),
        );
        let fields = vec![
            Field::new("first", FieldKind::String).tagged(&scoped),
            Field::new("second", FieldKind::String).tagged(&scoped),
        ];

        let buckets = scan(&fields).unwrap();
        assert_eq!(buckets.action_specific.queue_field.unwrap().field, "second");
    }

    #[test]
    fn test_referenced_fields() {
        let set = PrintFieldSet {
            queue_field: Some("q".to_string()),
            copy_field: Some("c".to_string()),
            content_fields: vec![ContentFieldSpec::new("file", "fileName")],
            file_selector: None,
        };

        let fields: Vec<&str> = set.referenced_fields().collect();
        assert_eq!(fields, vec!["q", "c", "file", "fileName"]);
    }
}

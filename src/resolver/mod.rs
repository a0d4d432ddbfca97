//! # Runtime Resolver
//!
//! Turns one print request into a [`ResolvedPrintJob`] by combining the
//! registry's configuration for the target entity and action with the values
//! the caller supplied and the values persisted on the record.
//!
//! ## Resolution order
//!
//! 1. Look up the entity's generic bucket and the action's derived bucket.
//! 2. Fetch the record once, reading every entity-backed field either bucket
//!    references. Action parameters are never fetched.
//! 3. Queue: exactly one bucket may name a queue field; the caller's value wins
//!    over the record's, and the result must be populated.
//! 4. Copies: same exclusivity; a populated caller value wins, otherwise the
//!    record value is read for the generic copy field only.
//! 5. Documents: both buckets' content fields are merged, optionally narrowed
//!    by the file selector, resolved value by value, then normalized so exactly
//!    one main document remains.
//!
//! Every rule violation ends the request with a [`ResolveError`]; there is no
//! partial result and nothing is retried. The resolver holds no mutable state,
//! so one instance serves concurrent requests.

pub mod errors;

pub use errors::{ErrorKind, PrintSetting, ResolveError};

use crate::registry::{ActionKey, PrintRegistry};
use crate::scanner::{ContentFieldSpec, PrintFieldSet};
use crate::schema::{Record, Value};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;

/// Context of one print attempt.
///
/// `params` holds exactly what the caller sent. Parameter defaults declared in
/// the schema, such as the synthesized copy count of `1`, are never applied
/// here: a host that wants them must fill them in before resolving, otherwise
/// an omitted copy count ends in a missing-configuration error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintRequest {
    /// Qualified name of the owning entity
    pub entity: String,
    pub action: String,
    /// Primary key of the record to print
    pub key: Record,
    /// Caller-supplied action parameter values
    pub params: Record,
}

impl PrintRequest {
    pub fn new(entity: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            action: action.into(),
            ..Self::default()
        }
    }

    pub fn with_key(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.key.insert(field.into(), value.into());
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn action_key(&self) -> ActionKey {
        ActionKey::new(&self.entity, &self.action)
    }
}

/// Failure reported by a [`RecordSource`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RecordSourceError {
    pub message: String,
}

impl RecordSourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Read access to persisted records, provided by the host
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch `fields` of the record of `entity` identified by `key`.
    ///
    /// Returns `Ok(None)` when no such record exists. Fields the record does not
    /// hold may be left out of the result.
    async fn fetch_fields(
        &self,
        entity: &str,
        key: &Record,
        fields: &[String],
    ) -> Result<Option<Record>, RecordSourceError>;
}

/// One document of a resolved job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintDocument {
    /// Content field the document was read from
    pub field: String,
    pub file_name: String,
    pub content: Vec<u8>,
    pub is_main_document: bool,
}

/// Final description of a print job, ready for the printing service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPrintJob {
    pub queue_id: String,
    pub copies: u32,
    pub documents: Vec<PrintDocument>,
}

impl ResolvedPrintJob {
    pub fn main_document(&self) -> Option<&PrintDocument> {
        self.documents.iter().find(|d| d.is_main_document)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Entity,
    Action,
}

/// Resolves print requests against a shared registry
#[derive(Debug, Clone)]
pub struct PrintResolver {
    registry: Arc<PrintRegistry>,
}

impl PrintResolver {
    pub fn new(registry: Arc<PrintRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &PrintRegistry {
        &self.registry
    }

    /// Fetch the record once and resolve the request against it
    pub async fn resolve(
        &self,
        request: &PrintRequest,
        source: &dyn RecordSource,
    ) -> Result<ResolvedPrintJob, ResolveError> {
        let fields = self.fields_to_fetch(request);

        let record = source
            .fetch_fields(&request.entity, &request.key, &fields)
            .await
            .map_err(|e| ResolveError::RecordFetch {
                entity: request.entity.clone(),
                message: e.message,
            })?
            .ok_or_else(|| ResolveError::RecordNotFound {
                entity: request.entity.clone(),
            })?;

        self.resolve_with_record(request, &record)
    }

    /// Resolve against an already fetched record
    pub fn resolve_with_record(
        &self,
        request: &PrintRequest,
        record: &Record,
    ) -> Result<ResolvedPrintJob, ResolveError> {
        let empty = PrintFieldSet::default();
        let generic = self
            .registry
            .lookup_entity(&request.entity)
            .map_or(&empty, |config| &config.generic);
        let action = self
            .registry
            .lookup_action(&request.action_key())
            .unwrap_or(&empty);

        let queue_id = resolve_queue(generic, action, &request.params, record)?;
        let copies = resolve_copies(generic, action, &request.params, record)?;
        let documents = resolve_documents(generic, action, &request.params, record)?;

        Ok(ResolvedPrintJob {
            queue_id,
            copies,
            documents,
        })
    }

    /// Entity-backed fields the request reads from the record, sorted.
    ///
    /// Covers the entity's generic fields, its fields scoped to the action and
    /// the fields the action's config references. Names of the action's own
    /// parameters are never part of the record and are left out.
    pub fn fields_to_fetch(&self, request: &PrintRequest) -> Vec<String> {
        let mut fields: BTreeSet<&str> = BTreeSet::new();

        if let Some(config) = self.registry.lookup_entity(&request.entity) {
            fields.extend(config.generic.referenced_fields());

            let scoped = &config.action_specific;
            fields.extend(
                scoped
                    .queue_field
                    .iter()
                    .chain(scoped.copy_field.iter())
                    .filter(|f| f.applies_to(&request.action))
                    .map(|f| f.field.as_str()),
            );
            for content in scoped
                .content_fields
                .iter()
                .filter(|c| c.applies_to(&request.action))
            {
                fields.insert(&content.spec.content_field);
                fields.extend(content.spec.file_name_field.as_deref());
            }
        }

        let key = request.action_key();
        if let Some(action) = self.registry.lookup_action(&key) {
            let parameters = self.registry.action_parameters(&key);
            fields.extend(
                action
                    .referenced_fields()
                    .filter(|f| parameters.map_or(true, |p| !p.contains(*f))),
            );
        }

        fields.into_iter().map(str::to_string).collect()
    }
}

// Pick the only configured field of a setting
fn exclusive_field<'a>(
    setting: PrintSetting,
    entity: Option<&'a String>,
    action: Option<&'a String>,
) -> Result<Option<(&'a str, Origin)>, ResolveError> {
    match (entity, action) {
        (Some(entity_field), Some(action_field)) => Err(ResolveError::DualSourceConflict {
            setting,
            entity_field: entity_field.clone(),
            action_field: action_field.clone(),
        }),
        (Some(field), None) => Ok(Some((field, Origin::Entity))),
        (None, Some(field)) => Ok(Some((field, Origin::Action))),
        (None, None) => Ok(None),
    }
}

// Caller value unless null, then the record value
fn caller_or_record<'a>(params: &'a Record, record: &'a Record, field: &str) -> Option<&'a Value> {
    params
        .get(field)
        .filter(|v| !v.is_null())
        .or_else(|| record.get(field))
}

fn resolve_queue(
    generic: &PrintFieldSet,
    action: &PrintFieldSet,
    params: &Record,
    record: &Record,
) -> Result<String, ResolveError> {
    let (field, _) = exclusive_field(
        PrintSetting::Queue,
        generic.queue_field.as_ref(),
        action.queue_field.as_ref(),
    )?
    .ok_or_else(|| ResolveError::missing(PrintSetting::Queue, None))?;

    caller_or_record(params, record, field)
        .and_then(Value::to_display_string)
        .ok_or_else(|| ResolveError::missing(PrintSetting::Queue, Some(field)))
}

fn resolve_copies(
    generic: &PrintFieldSet,
    action: &PrintFieldSet,
    params: &Record,
    record: &Record,
) -> Result<u32, ResolveError> {
    let (field, origin) = exclusive_field(
        PrintSetting::Copies,
        generic.copy_field.as_ref(),
        action.copy_field.as_ref(),
    )?
    .ok_or_else(|| ResolveError::missing(PrintSetting::Copies, None))?;

    // the persisted value is only consulted for the entity's generic copy field
    let value = params
        .get(field)
        .filter(|v| v.is_populated())
        .or_else(|| match origin {
            Origin::Entity => record.get(field),
            Origin::Action => None,
        });

    value
        .and_then(Value::as_copies)
        .ok_or_else(|| ResolveError::missing(PrintSetting::Copies, Some(field)))
}

fn resolve_documents(
    generic: &PrintFieldSet,
    action: &PrintFieldSet,
    params: &Record,
    record: &Record,
) -> Result<Vec<PrintDocument>, ResolveError> {
    let mut specs: Vec<&ContentFieldSpec> = generic
        .content_fields
        .iter()
        .chain(action.content_fields.iter())
        .collect();

    let selector = action
        .file_selector
        .as_ref()
        .or(generic.file_selector.as_ref());

    let selected = selector
        .and_then(|selector| params.get(selector))
        .and_then(Value::as_text)
        .filter(|name| !name.is_empty());
    if let Some(name) = selected {
        specs.retain(|spec| spec.content_field == name);
    }

    // the selector names a content field; it never supplies document values
    let document_params: Record = match selector {
        Some(selector) => params
            .iter()
            .filter(|(name, _)| name.as_str() != selector.as_str())
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect(),
        None => params.clone(),
    };

    let mut documents = specs
        .into_iter()
        .map(|spec| resolve_document(spec, &document_params, record))
        .collect::<Result<Vec<_>, _>>()?;

    normalize_main_document(&mut documents)?;
    Ok(documents)
}

fn resolve_document(
    spec: &ContentFieldSpec,
    params: &Record,
    record: &Record,
) -> Result<PrintDocument, ResolveError> {
    let file_name_field = spec
        .file_name_field
        .as_deref()
        .ok_or_else(|| ResolveError::missing(PrintSetting::FileName, None))?;

    let content = caller_or_record(params, record, &spec.content_field)
        .and_then(Value::to_content)
        .ok_or_else(|| ResolveError::missing(PrintSetting::Content, Some(&spec.content_field)))?;

    let file_name = caller_or_record(params, record, file_name_field)
        .and_then(Value::to_display_string)
        .ok_or_else(|| ResolveError::missing(PrintSetting::FileName, Some(file_name_field)))?;

    Ok(PrintDocument {
        field: spec.content_field.clone(),
        file_name,
        content,
        is_main_document: spec.is_main_document,
    })
}

/// Enforce exactly one main document.
///
/// A single document becomes the main document whatever its tag says. Two or
/// more documents must carry exactly one main-document marker between them.
pub fn normalize_main_document(documents: &mut [PrintDocument]) -> Result<(), ResolveError> {
    match documents {
        [] => Err(ResolveError::NoContent),
        [only] => {
            only.is_main_document = true;
            Ok(())
        }
        _ => {
            let main: Vec<String> = documents
                .iter()
                .filter(|d| d.is_main_document)
                .map(|d| d.field.clone())
                .collect();

            match main.len() {
                1 => Ok(()),
                0 => Err(ResolveError::MainDocumentMissing {
                    count: documents.len(),
                }),
                _ => Err(ResolveError::MultipleMainDocuments { fields: main }),
            }
        }
    }
}

//! # File Lookup
//!
//! Backs the synthesized files lookup entity: lists the content fields of one
//! record so a user can pick which document to print.
//!
//! The record is addressed by positional key values. The n-th value belongs to
//! the n-th key field in lexicographic order, the same order the enhancer used
//! when it generated the `entityKey1..entityKeyN` parameters.

use crate::enhancer::templates::entity_key_position;
use crate::resolver::{RecordSource, RecordSourceError};
use crate::schema::{Record, Schema, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// One selectable content field of a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub entity: String,
    pub property: String,
    pub file_name: Option<String>,
    pub label: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Entity not found: {entity}")]
    EntityNotFound { entity: String },

    #[error("{entity} has {expected} key fields but {actual} key values were given")]
    KeyCountMismatch {
        entity: String,
        expected: usize,
        actual: usize,
    },

    #[error("Object not found: {entity}")]
    RecordNotFound { entity: String },

    #[error("failed to fetch {entity}: {source}")]
    Fetch {
        entity: String,
        source: RecordSourceError,
    },
}

impl LookupError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::EntityNotFound { .. } => "PRINT_ENTITY_NOT_FOUND",
            Self::KeyCountMismatch { .. } => "PRINT_INVALID_FILTER_FORMAT",
            Self::RecordNotFound { .. } => "PRINT_OBJECT_NOT_FOUND",
            Self::Fetch { .. } => "PRINT_RECORD_FETCH_FAILED",
        }
    }

    pub fn http_status(&self) -> u16 {
        match self {
            Self::EntityNotFound { .. } | Self::RecordNotFound { .. } => 404,
            Self::KeyCountMismatch { .. } => 400,
            Self::Fetch { .. } => 500,
        }
    }
}

/// Lists the content fields of records of a schema
#[derive(Debug, Clone, Copy)]
pub struct FileLookup<'a> {
    schema: &'a Schema,
}

impl<'a> FileLookup<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// List the content fields of the record of `entity` addressed by `keys`
    pub async fn list(
        &self,
        entity: &str,
        keys: &[Value],
        source: &dyn RecordSource,
    ) -> Result<Vec<FileEntry>, LookupError> {
        let definition = self
            .schema
            .entity(entity)
            .ok_or_else(|| LookupError::EntityNotFound {
                entity: entity.to_string(),
            })?;

        let key_fields = definition.key_fields_sorted();
        if key_fields.len() != keys.len() {
            return Err(LookupError::KeyCountMismatch {
                entity: entity.to_string(),
                expected: key_fields.len(),
                actual: keys.len(),
            });
        }

        let key: Record = key_fields
            .iter()
            .map(|f| (*f).to_string())
            .zip(keys.iter().cloned())
            .collect();

        let binary: Vec<_> = definition.binary_fields().collect();
        let name_fields: BTreeSet<String> = binary
            .iter()
            .filter_map(|f| f.content_disposition.clone())
            .collect();
        let name_fields: Vec<String> = name_fields.into_iter().collect();

        let record = source
            .fetch_fields(entity, &key, &name_fields)
            .await
            .map_err(|source| LookupError::Fetch {
                entity: entity.to_string(),
                source,
            })?
            .ok_or_else(|| LookupError::RecordNotFound {
                entity: entity.to_string(),
            })?;

        Ok(binary
            .into_iter()
            .map(|field| FileEntry {
                entity: entity.to_string(),
                property: field.name.clone(),
                file_name: field
                    .content_disposition
                    .as_ref()
                    .and_then(|name| record.get(name))
                    .and_then(Value::to_display_string),
                label: field.label.clone().unwrap_or_else(|| field.name.clone()),
            })
            .collect())
    }
}

/// Positional key values from `entityKeyN` filter entries, ordered by position.
///
/// Entries that are not positional keys are ignored.
pub fn positional_keys(filter: &Record) -> Vec<Value> {
    let mut keys: Vec<(usize, &Value)> = filter
        .iter()
        .filter_map(|(name, value)| entity_key_position(name).map(|n| (n, value)))
        .collect();
    keys.sort_by_key(|(n, _)| *n);
    keys.into_iter().map(|(_, value)| value.clone()).collect()
}

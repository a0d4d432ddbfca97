//! In-memory record sources.

use async_trait::async_trait;
use print_core::resolver::{RecordSource, RecordSourceError};
use print_core::schema::Record;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Records keyed by entity and primary key; counts every fetch
#[derive(Debug, Default)]
pub struct InMemoryRecords {
    rows: Vec<(String, Record, Record)>,
    fetches: AtomicUsize,
    requested: Mutex<Vec<Vec<String>>>,
}

impl InMemoryRecords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_row(mut self, entity: &str, key: Record, values: Record) -> Self {
        self.rows.push((entity.to_string(), key, values));
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Field lists of every fetch, in call order
    pub fn requested_fields(&self) -> Vec<Vec<String>> {
        self.requested.lock().expect("lock poisoned").clone()
    }
}

#[async_trait]
impl RecordSource for InMemoryRecords {
    async fn fetch_fields(
        &self,
        entity: &str,
        key: &Record,
        fields: &[String],
    ) -> Result<Option<Record>, RecordSourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.requested
            .lock()
            .expect("lock poisoned")
            .push(fields.to_vec());

        Ok(self
            .rows
            .iter()
            .find(|(name, row_key, _)| name == entity && row_key == key)
            .map(|(_, _, values)| {
                values
                    .iter()
                    .filter(|(field, _)| fields.contains(field))
                    .map(|(field, value)| (field.clone(), value.clone()))
                    .collect()
            }))
    }
}

/// A source whose every fetch fails
#[derive(Debug, Default)]
pub struct UnavailableRecords;

#[async_trait]
impl RecordSource for UnavailableRecords {
    async fn fetch_fields(
        &self,
        _entity: &str,
        _key: &Record,
        _fields: &[String],
    ) -> Result<Option<Record>, RecordSourceError> {
        Err(RecordSourceError::new("connection refused"))
    }
}

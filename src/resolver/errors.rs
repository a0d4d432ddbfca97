//! Request-time resolution errors.
//!
//! Every variant is terminal for the request that raised it. Each carries a
//! fixed machine-readable code the host maps to a user-facing response, plus
//! the offending field where one exists.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The print setting a resolution rule was checking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrintSetting {
    Queue,
    Copies,
    Content,
    FileName,
}

impl fmt::Display for PrintSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Queue => "queue",
            Self::Copies => "copies",
            Self::Content => "content",
            Self::FileName => "file name",
        };
        f.write_str(name)
    }
}

/// Coarse classification of a [`ResolveError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    DualSourceConflict,
    MissingConfiguration,
    MainDocumentCardinality,
    NoContent,
    RecordNotFound,
    RecordFetch,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("{setting} field configured in both the entity and the action (entity field '{entity_field}', action field '{action_field}')")]
    DualSourceConflict {
        setting: PrintSetting,
        entity_field: String,
        action_field: String,
    },

    #[error("print configuration missing: {setting} is not populated{}", field.as_deref().map(|f| format!(" (field '{f}')")).unwrap_or_default())]
    MissingConfiguration {
        setting: PrintSetting,
        field: Option<String>,
    },

    #[error("at least one main document required among {count} documents")]
    MainDocumentMissing { count: usize },

    #[error("multiple main documents found: {fields:?}")]
    MultipleMainDocuments { fields: Vec<String> },

    #[error("no content found to print")]
    NoContent,

    #[error("object not found for printing: {entity}")]
    RecordNotFound { entity: String },

    #[error("failed to fetch {entity}: {message}")]
    RecordFetch { entity: String, message: String },
}

impl ResolveError {
    pub fn missing(setting: PrintSetting, field: Option<&str>) -> Self {
        Self::MissingConfiguration {
            setting,
            field: field.map(str::to_string),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DualSourceConflict { .. } => ErrorKind::DualSourceConflict,
            Self::MissingConfiguration { .. } => ErrorKind::MissingConfiguration,
            Self::MainDocumentMissing { .. } | Self::MultipleMainDocuments { .. } => {
                ErrorKind::MainDocumentCardinality
            }
            Self::NoContent => ErrorKind::NoContent,
            Self::RecordNotFound { .. } => ErrorKind::RecordNotFound,
            Self::RecordFetch { .. } => ErrorKind::RecordFetch,
        }
    }

    /// Fixed message code for host-side translation
    pub fn code(&self) -> &'static str {
        match self {
            Self::DualSourceConflict { setting, .. } => match setting {
                PrintSetting::Copies => "PRINT_COPIES_CONFLICT",
                _ => "PRINT_QUEUE_CONFLICT",
            },
            Self::MissingConfiguration { setting, .. } => match setting {
                PrintSetting::Queue => "PRINT_QUEUE_MISSING",
                PrintSetting::Copies => "PRINT_COPIES_MISSING",
                PrintSetting::Content => "PRINT_CONTENT_MISSING",
                PrintSetting::FileName => "PRINT_FILE_NAME_MISSING",
            },
            Self::MainDocumentMissing { .. } => "PRINT_MAIN_DOCUMENT_MISSING",
            Self::MultipleMainDocuments { .. } => "PRINT_MULTIPLE_MAIN_DOCUMENTS",
            Self::NoContent => "PRINT_NO_CONTENT",
            Self::RecordNotFound { .. } => "PRINT_OBJECT_NOT_FOUND",
            Self::RecordFetch { .. } => "PRINT_RECORD_FETCH_FAILED",
        }
    }

    /// HTTP-like status the host should answer with
    pub fn http_status(&self) -> u16 {
        match self.kind() {
            ErrorKind::MissingConfiguration => 400,
            ErrorKind::RecordNotFound => 404,
            _ => 500,
        }
    }

    /// Field the failing rule was reading, when there is exactly one
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingConfiguration { field, .. } => field.as_deref(),
            _ => None,
        }
    }
}

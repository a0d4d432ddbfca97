//! Load-time schema errors.
//!
//! Raised while decoding annotations, enhancing the schema or validating print
//! actions. Fatal to startup for the affected entity; the host decides whether
//! to abort startup entirely.

use thiserror::Error;

/// Schema configuration errors with the offending definition attached
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Printable entity declares more key fields than the files lookup can encode
    #[error("entity '{entity}' declares {count} key fields; printable entities support at most {max}")]
    TooManyKeyFields {
        entity: String,
        count: usize,
        max: usize,
    },

    /// Print action lacks a source for a mandatory print setting
    #[error("print action '{action}' of entity '{entity}' is missing required annotations: {missing:?}")]
    MissingPrintTags {
        entity: String,
        action: String,
        missing: Vec<&'static str>,
    },

    /// Annotation value has an unsupported shape
    #[error("invalid annotation '{annotation}' on field '{field}': {reason}")]
    InvalidAnnotation {
        field: String,
        annotation: String,
        reason: String,
    },

    /// Referenced entity does not exist in the schema
    #[error("entity '{entity}' not found in schema")]
    EntityNotFound { entity: String },
}

impl SchemaError {
    pub fn invalid_annotation(
        field: impl Into<String>,
        annotation: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidAnnotation {
            field: field.into(),
            annotation: annotation.into(),
            reason: reason.into(),
        }
    }

    /// Name of the entity the error is attached to, when known
    pub fn entity(&self) -> Option<&str> {
        match self {
            Self::TooManyKeyFields { entity, .. }
            | Self::MissingPrintTags { entity, .. }
            | Self::EntityNotFound { entity } => Some(entity),
            Self::InvalidAnnotation { .. } => None,
        }
    }
}

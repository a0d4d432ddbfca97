//! Crate-level error type.
//!
//! Each layer has its own error enum; [`PrintCoreError`] collects them for
//! hosts that drive the whole pipeline through one `Result`.

use crate::config::ConfigurationError;
use crate::dispatch::DispatchError;
use crate::lookup::LookupError;
use crate::resolver::ResolveError;
use crate::schema::SchemaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrintCoreError {
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Resolve error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

impl PrintCoreError {
    /// HTTP-like status the host should answer with
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Resolve(e) => e.http_status(),
            Self::Dispatch(e) => e.status(),
            Self::Lookup(e) => e.http_status(),
            Self::Schema(_) | Self::Configuration(_) => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, PrintCoreError>;

#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Print Core
//!
//! Annotation-driven print configuration for business-object schemas.
//!
//! ## Overview
//!
//! Schema fields and action parameters carry declarative `@print.*` tags that
//! say which field holds the print queue, the copy count and the documents to
//! print. This crate turns those tags into a print capability:
//!
//! - the **schema enhancer** synthesizes a bound `print` action and the queue
//!   and file lookup entities for every printable entity
//! - the **metadata scanner** sorts tagged fields into a generic bucket and an
//!   action-specific bucket
//! - the **registry** stores the scan result per entity and per action
//! - the **resolver** combines registry, caller input and one record fetch into
//!   a concrete print job on every request
//!
//! ## Module Organization
//!
//! - [`schema`] - Schema graph, runtime values and tag decoding
//! - [`scanner`] - Classification of tagged fields
//! - [`registry`] - Entity and action print configuration
//! - [`enhancer`] - Print action and lookup synthesis
//! - [`bootstrap`] - Load-time pipeline producing a [`PrintModel`]
//! - [`resolver`] - Request-time resolution of print jobs
//! - [`printer`] - Printing service boundary and console printer
//! - [`dispatch`] - Resolve, submit and report in one call
//! - [`lookup`] - Content fields of a record for the files lookup
//! - [`config`] - Layered settings
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use print_core::config::SettingsLoader;
//! use print_core::printer::ConsolePrinter;
//! use print_core::{PrintDispatcher, PrintModel, Schema};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = SettingsLoader::load()?;
//! print_core::logging::init_structured_logging(&settings.logging);
//!
//! let schema: Schema = serde_json::from_str(&std::fs::read_to_string("schema.json")?)?;
//! let model = PrintModel::load(schema, &settings.enhancer)?;
//!
//! let printer = Arc::new(ConsolePrinter::from_settings(&settings.printer));
//! let dispatcher = PrintDispatcher::new(model.registry(), printer);
//! # let _ = dispatcher;
//! # Ok(())
//! # }
//! ```

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod dispatch;
pub mod enhancer;
pub mod error;
pub mod logging;
pub mod lookup;
pub mod printer;
pub mod registry;
pub mod resolver;
pub mod scanner;
pub mod schema;

pub use bootstrap::PrintModel;
pub use config::{PrintSettings, SettingsLoader};
pub use dispatch::{DispatchError, PrintDispatcher, PrintOutcome};
pub use enhancer::{enhance, SchemaEnhancer};
pub use error::{PrintCoreError, Result};
pub use lookup::{FileEntry, FileLookup, LookupError};
pub use printer::{ConsolePrinter, PrintingService};
pub use registry::{ActionKey, PrintRegistry};
pub use resolver::{
    PrintRequest, PrintResolver, RecordSource, ResolveError, ResolvedPrintJob,
};
pub use scanner::{scan, ActionPrintConfig, EntityPrintConfig};
pub use schema::{Record, Schema, SchemaError, Value};

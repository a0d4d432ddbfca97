//! # Registry Infrastructure
//!
//! Holds the print configuration collected while the schema loads.
//!
//! ## Overview
//!
//! ```text
//! Schema load                         Request time
//! ├── scan(entity.fields) ──register──► PrintRegistry ◄── lookup_entity
//! └── scan(action.params)                             ◄── lookup_action
//!     + derive_action_config ──register_action──┘
//! ```

pub mod print_registry;

pub use print_registry::{
    content_field_names, derive_action_config, ActionKey, PrintRegistry, RegistryStats,
};

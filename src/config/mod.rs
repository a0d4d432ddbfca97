//! # Print Settings
//!
//! Settings for the print core: names used by the schema enhancer, the queues
//! offered by the console printer and the logging setup.
//!
//! ## Architecture
//!
//! - **Layered sources**: built-in defaults, `config/print.yaml`,
//!   `config/print.<env>.yaml`, then `PRINT__*` environment variables
//! - **Environment awareness**: `PRINT_ENV`, then `APP_ENV`, default `development`
//! - **Explicit validation**: invalid values fail loading instead of being
//!   silently replaced
//!
//! ## Usage
//!
//! ```rust,no_run
//! use print_core::config::SettingsLoader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = SettingsLoader::load()?;
//! println!("print action name: {}", settings.enhancer.action_name);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use crate::constants::{synthesized, DEFAULT_CONSOLE_QUEUES, DEFAULT_COPIES, MAX_KEY_FIELDS};
use serde::{Deserialize, Serialize};

pub use error::{ConfigResult, ConfigurationError};
pub use loader::SettingsLoader;

/// Root settings structure mirroring `config/print.yaml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintSettings {
    /// Console printer settings
    pub printer: PrinterSettings,

    /// Names and limits used when synthesizing print artifacts
    pub enhancer: EnhancerSettings,

    /// Structured logging settings
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrinterSettings {
    /// Queues listed by the console printer
    pub queues: Vec<String>,
}

impl Default for PrinterSettings {
    fn default() -> Self {
        Self {
            queues: DEFAULT_CONSOLE_QUEUES
                .iter()
                .map(|q| (*q).to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancerSettings {
    /// Name of the synthesized bound action
    pub action_name: String,

    /// Unqualified name of the queue lookup entity
    pub queue_lookup_name: String,

    /// Unqualified name of the files lookup entity
    pub files_lookup_name: String,

    /// Default of the synthesized copy-count parameter
    pub default_copies: u32,

    /// Maximum number of key fields of a printable entity
    pub max_key_fields: usize,
}

impl Default for EnhancerSettings {
    fn default() -> Self {
        Self {
            action_name: synthesized::PRINT_ACTION.to_string(),
            queue_lookup_name: synthesized::QUEUE_LOOKUP.to_string(),
            files_lookup_name: synthesized::FILES_LOOKUP.to_string(),
            default_copies: DEFAULT_COPIES,
            max_key_fields: MAX_KEY_FIELDS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive; derived from the environment when unset
    pub level: Option<String>,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl PrintSettings {
    /// Validate settings after loading
    pub fn validate(&self) -> ConfigResult<()> {
        self.enhancer.validate()?;

        if self.printer.queues.is_empty() {
            return Err(ConfigurationError::missing_required_field(
                "printer.queues",
                "printer configuration",
            ));
        }

        if self.printer.queues.iter().any(|q| q.trim().is_empty()) {
            return Err(ConfigurationError::invalid_value(
                "printer.queues",
                "",
                "queue names must not be empty",
            ));
        }

        Ok(())
    }
}

impl EnhancerSettings {
    pub fn validate(&self) -> ConfigResult<()> {
        for (field, value) in [
            ("enhancer.action_name", &self.action_name),
            ("enhancer.queue_lookup_name", &self.queue_lookup_name),
            ("enhancer.files_lookup_name", &self.files_lookup_name),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigurationError::missing_required_field(
                    field,
                    "enhancer configuration",
                ));
            }
        }

        if self.default_copies == 0 {
            return Err(ConfigurationError::invalid_value(
                "enhancer.default_copies",
                "0",
                "default copy count must be greater than 0",
            ));
        }

        if self.max_key_fields == 0 || self.max_key_fields > MAX_KEY_FIELDS {
            return Err(ConfigurationError::invalid_value(
                "enhancer.max_key_fields",
                self.max_key_fields.to_string(),
                format!("must be between 1 and {MAX_KEY_FIELDS}, the key parameters of the files lookup"),
            ));
        }

        Ok(())
    }
}

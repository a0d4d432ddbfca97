//! Settings Loader
//!
//! Environment-aware settings loading. Discovers YAML files in the config
//! directory, layers the environment-specific file over the base file, and lets
//! `PRINT__*` environment variables override both.

use super::error::{ConfigResult, ConfigurationError};
use super::PrintSettings;
use config::{Config, Environment, File};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Base name of the settings files (`print.yaml`, `print.<env>.yaml`)
const SETTINGS_FILE_STEM: &str = "print";

/// Prefix of overriding environment variables, e.g. `PRINT__ENHANCER__ACTION_NAME`
const ENV_PREFIX: &str = "PRINT";

/// Loads [`PrintSettings`] from layered sources
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings with environment auto-detection from `./config`
    pub fn load() -> ConfigResult<PrintSettings> {
        Self::load_from_directory(None)
    }

    /// Load settings from a specific directory
    pub fn load_from_directory(config_dir: Option<PathBuf>) -> ConfigResult<PrintSettings> {
        let environment = Self::detect_environment();
        Self::load_from_directory_with_env(config_dir, &environment)
    }

    /// Load settings from a specific directory with explicit environment.
    /// Useful for testing without modifying global environment variables.
    pub fn load_from_directory_with_env(
        config_dir: Option<PathBuf>,
        environment: &str,
    ) -> ConfigResult<PrintSettings> {
        let config_directory = config_dir.unwrap_or_else(Self::default_config_directory);

        debug!(
            "Loading print settings for environment '{}' from directory: {}",
            environment,
            config_directory.display()
        );

        // unset keys fall back to the serde defaults of the settings structs
        let settings: PrintSettings = Config::builder()
            .add_source(File::from(Self::base_file(&config_directory)).required(false))
            .add_source(
                File::from(Self::environment_file(&config_directory, environment))
                    .required(false),
            )
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .and_then(|config| config.try_deserialize::<PrintSettings>())
            .map_err(|e| ConfigurationError::load_error(environment, e))?;

        settings.validate()?;

        debug!(
            environment = environment,
            action_name = %settings.enhancer.action_name,
            queues = settings.printer.queues.len(),
            "Print settings loaded successfully"
        );

        Ok(settings)
    }

    /// Detect the current environment from environment variables
    pub fn detect_environment() -> String {
        env::var("PRINT_ENV")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string())
    }

    fn default_config_directory() -> PathBuf {
        PathBuf::from("config")
    }

    fn base_file(config_directory: &Path) -> PathBuf {
        config_directory.join(format!("{SETTINGS_FILE_STEM}.yaml"))
    }

    fn environment_file(config_directory: &Path, environment: &str) -> PathBuf {
        config_directory.join(format!("{SETTINGS_FILE_STEM}.{environment}.yaml"))
    }
}

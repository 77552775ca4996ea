//! Identity store settings
//!
//! Settings are read once at process start from, in increasing precedence:
//!
//! 1. built-in defaults
//! 2. `customerprovisioning.toml` in the working directory, or an explicit file
//! 3. environment variables prefixed `CUSTOMERPROVISIONING__`, with `__`
//!    between nested keys (e.g. `CUSTOMERPROVISIONING__ATTRIBUTES__GIVEN_NAME`)
//!
//! A `.env` file is honoured by [`IdentityStoreSettings::load`].

use std::path::Path;

use core_kernel::{CoreError, ExternalAuthConfig};
use serde::Deserialize;
use thiserror::Error;

use crate::adapters::rest_client::IdentityStoreClientConfig;
use crate::mapping::AttributeCodeTable;

/// Base name of the optional settings file
pub const DEFAULT_SETTINGS_FILE: &str = "customerprovisioning";

/// Prefix of the environment variables read as settings
pub const ENV_PREFIX: &str = "CUSTOMERPROVISIONING";

/// Application code sent to the identity store when none is configured
pub const DEFAULT_APPLICATION_CODE: &str = "CustomerProvisioning";

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error(transparent)]
    Invalid(#[from] CoreError),
}

/// Settings of the identity store module
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityStoreSettings {
    /// Base URL of the identity store REST API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Code identifying this application to the identity store
    #[serde(default = "default_application_code")]
    pub application_code: String,
    /// Request hash expected by the identity store, empty when unused
    #[serde(default)]
    pub hash: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub auth: ExternalAuthConfig,
    /// Log level used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub attributes: AttributeCodeTable,
}

fn default_base_url() -> String {
    "http://localhost:8080/rest/identitystore/v1".to_string()
}

fn default_application_code() -> String {
    DEFAULT_APPLICATION_CODE.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for IdentityStoreSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            application_code: default_application_code(),
            hash: String::new(),
            timeout_secs: default_timeout_secs(),
            auth: ExternalAuthConfig::None,
            log_level: default_log_level(),
            attributes: AttributeCodeTable::default(),
        }
    }
}

impl IdentityStoreSettings {
    /// Loads settings from `.env`, the default settings file and the environment
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();
        Self::load_from(None)
    }

    /// Loads settings from an explicit file (or the default one) and the environment
    pub fn load_from(path: Option<&Path>) -> Result<Self, SettingsError> {
        let file = match path {
            Some(path) => config::File::from(path),
            None => config::File::with_name(DEFAULT_SETTINGS_FILE).required(false),
        };

        let settings: Self = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Parses settings from TOML text, without consulting the environment
    pub fn from_toml(text: &str) -> Result<Self, SettingsError> {
        let settings: Self = config::Config::builder()
            .add_source(config::File::from_str(text, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Checks the settings the adapter cannot work without
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.base_url.trim().is_empty() {
            return Err(CoreError::configuration("base_url must not be blank"));
        }
        if self.application_code.trim().is_empty() {
            return Err(CoreError::configuration("application_code must not be blank"));
        }
        if self.timeout_secs == 0 {
            return Err(CoreError::configuration("timeout_secs must be positive"));
        }
        core_kernel::telemetry::parse_level(&self.log_level)?;
        self.attributes.validate()
    }

    /// Settings of the REST identity store client
    pub fn client_config(&self) -> IdentityStoreClientConfig {
        IdentityStoreClientConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            auth: self.auth.clone(),
        }
    }
}

//! Resolver configuration
//!
//! Loaded from TOML:
//!
//! ```toml
//! account_name = "devstore"
//! converters = ["Order", "Invoice"]
//!
//! [settings]
//! archive = "archive-2024"
//! ```

use crate::account::StaticAccountProvider;
use crate::name::SettingsNameResolver;
use crate::resolver::BindingResolver;
use blob_strategy::{BlobConverter, JsonConverter};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Default account used when none is configured
pub const DEFAULT_ACCOUNT: &str = "devstoreaccount1";

/// Configuration for a [`BindingResolver`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Storage account every parameter binds against
    #[serde(default = "default_account")]
    pub account_name: String,
    /// User type names with a JSON converter, in precedence order
    #[serde(default)]
    pub converters: Vec<String>,
    /// Values for `%setting%` references
    #[serde(default)]
    pub settings: HashMap<String, String>,
}

fn default_account() -> String {
    DEFAULT_ACCOUNT.to_string()
}

impl ResolverConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With account name
    #[inline]
    #[must_use]
    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account_name = account.into();
        self
    }

    /// With a converter for a user type
    #[inline]
    #[must_use]
    pub fn with_converter(mut self, type_name: impl Into<String>) -> Self {
        self.converters.push(type_name.into());
        self
    }

    /// With a `%setting%` value
    #[inline]
    #[must_use]
    pub fn with_setting(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings.insert(name.into(), value.into());
        self
    }

    /// Parse TOML text
    ///
    /// # Errors
    /// `ConfigError::Parse` for malformed TOML
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a TOML file
    ///
    /// # Errors
    /// `ConfigError::Io` if the file cannot be read, `ConfigError::Parse` if
    /// it is malformed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Build a resolver bound to a single reference-only account
    #[must_use]
    pub fn build_resolver(&self) -> BindingResolver {
        let accounts = Arc::new(StaticAccountProvider::for_account(&self.account_name));
        let mut builder = BindingResolver::builder(accounts);
        for type_name in &self.converters {
            let converter: Arc<dyn BlobConverter> = Arc::new(JsonConverter::new(type_name));
            builder = builder.converter(converter);
        }
        if !self.settings.is_empty() {
            builder = builder.name_resolver(Arc::new(SettingsNameResolver::new(
                self.settings.clone(),
            )));
        }
        builder.build()
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            account_name: default_account(),
            converters: Vec::new(),
            settings: HashMap::new(),
        }
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Malformed TOML
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

//! # Configuration Settings
//!
//! Typed settings bound once from the [`ConfigSource`] chain at startup. All of
//! them are immutable afterwards and shared read-only.

use serde::Serialize;
use tracing::{info, warn};

use super::source::{parse_profiles, ConfigSource, ACTIVE_PROFILES_KEY};
use crate::errors::{Error, Result};
use crate::secrets::{SecretString, VaultStoreConfig};

/// Placeholder reported for Vault settings that are not configured.
pub const NOT_AVAILABLE: &str = "N/A";

/// Scheme marking a config import as a Vault reference.
pub const VAULT_IMPORT_SCHEME: &str = "vault://";

fn bind_string(source: &ConfigSource, key: &str) -> Result<String> {
    match source.get_property(key)? {
        Some(value) => Ok(value),
        None => {
            warn!(property = %key, "Property is not set by any source; binding empty value");
            Ok(String::new())
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(Error::config(format!("Invalid boolean for {}: '{}'", key, other))),
    }
}

/// Application settings bound from the `app` prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AppSettings {
    pub name: String,
    pub version: String,
    pub message: String,
}

impl AppSettings {
    pub const PREFIX: &'static str = "app";

    pub fn bind(source: &ConfigSource) -> Result<Self> {
        let key = |field: &str| format!("{}.{}", Self::PREFIX, field);
        Ok(Self {
            name: bind_string(source, &key("name"))?,
            version: bind_string(source, &key("version"))?,
            message: bind_string(source, &key("message"))?,
        })
    }

    /// Log the bound values.
    pub fn log_loaded(&self) {
        info!("========== App Configuration from Vault ==========");
        info!(name = %self.name, "App Name: {}", self.name);
        info!(version = %self.version, "App Version: {}", self.version);
        info!(message = %self.message, "App Message: {}", self.message);
        info!("==================================================");
    }
}

/// Database credentials bound from the `database` prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: SecretString,
    pub url: String,
}

impl DatabaseSettings {
    pub const PREFIX: &'static str = "database";

    pub fn bind(source: &ConfigSource) -> Result<Self> {
        let key = |field: &str| format!("{}.{}", Self::PREFIX, field);
        Ok(Self {
            username: bind_string(source, &key("username"))?,
            password: SecretString::new(bind_string(source, &key("password"))?),
            url: bind_string(source, &key("url"))?,
        })
    }

    /// Log the bound values with the password partially masked.
    pub fn log_loaded(&self) {
        let masked = self.password.masked();
        info!("========== Database Configuration from Vault ==========");
        info!(username = %self.username, "Database Username: {}", self.username);
        info!(password = %masked, "Database Password: {}", masked);
        info!(url = %self.url, "Database URL: {}", self.url);
        info!("=======================================================");
    }
}

/// Vault connection and topology settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultSettings {
    /// `spring.cloud.vault.uri`, `N/A` when unset
    pub uri: String,
    /// `spring.cloud.vault.kv.backend`, default `secret`
    pub backend: String,
    /// `spring.config.import`, `N/A` when unset
    pub config_import: String,
    /// `spring.application.name`, default `unknown`
    pub application_name: String,
    /// `spring.cloud.vault.enabled`, default true
    pub enabled: bool,
    pub token: Option<SecretString>,
    pub namespace: Option<String>,
    /// Active deployment profiles
    pub profiles: Vec<String>,
}

impl Default for VaultSettings {
    fn default() -> Self {
        Self {
            uri: NOT_AVAILABLE.to_string(),
            backend: "secret".to_string(),
            config_import: NOT_AVAILABLE.to_string(),
            application_name: "unknown".to_string(),
            enabled: true,
            token: None,
            namespace: None,
            profiles: Vec::new(),
        }
    }
}

impl VaultSettings {
    pub fn bind(source: &ConfigSource) -> Result<Self> {
        let defaults = Self::default();
        let enabled = match source.get_property("spring.cloud.vault.enabled")? {
            Some(value) => parse_bool("spring.cloud.vault.enabled", &value)?,
            None => defaults.enabled,
        };
        let profiles = source
            .get_property(ACTIVE_PROFILES_KEY)?
            .map(|value| parse_profiles(&value))
            .unwrap_or_default();

        Ok(Self {
            uri: source.get_or("spring.cloud.vault.uri", &defaults.uri)?,
            backend: source.get_or("spring.cloud.vault.kv.backend", &defaults.backend)?,
            config_import: source.get_or("spring.config.import", &defaults.config_import)?,
            application_name: source.get_or("spring.application.name", &defaults.application_name)?,
            enabled,
            token: source.get_property("spring.cloud.vault.token")?.map(SecretString::new),
            namespace: source.get_property("spring.cloud.vault.namespace")?,
            profiles,
        })
    }

    /// Secret path named by a `vault://` config import, if any.
    pub fn import_path(&self) -> Option<&str> {
        self.config_import.strip_prefix(VAULT_IMPORT_SCHEME)
    }

    /// Client settings, or `None` when Vault is disabled or has no address.
    pub fn store_config(&self) -> Option<VaultStoreConfig> {
        let uri = self.uri.trim();
        if !self.enabled || uri.is_empty() || uri == NOT_AVAILABLE {
            return None;
        }
        Some(VaultStoreConfig {
            address: uri.to_string(),
            token: self.token.clone(),
            namespace: self.namespace.clone(),
        })
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub address: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { address: "0.0.0.0".to_string(), port: 8080 }
    }
}

impl ServerSettings {
    pub fn bind(source: &ConfigSource) -> Result<Self> {
        let defaults = Self::default();
        let port = match source.get_property("server.port")? {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|e| Error::config(format!("Invalid server port '{}': {}", value, e)))?,
            None => defaults.port,
        };

        Ok(Self { address: source.get_or("server.address", &defaults.address)?, port })
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

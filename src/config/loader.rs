//! # Configuration Loader
//!
//! Populates the [`ConfigSource`] chain at startup. Precedence, highest first:
//!
//! ```text
//! commandLineArgs -> systemEnvironment -> vault:<path> -> application-<profile> -> application
//! ```
//!
//! The Vault source is only present when `spring.config.import` names a
//! `vault://` path and a Vault client is configured. A failed Vault read is
//! logged and the service starts with the remaining sources.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use super::settings::VaultSettings;
use super::source::{
    ConfigSource, EnvironmentPropertySource, FilePropertySource, MapPropertySource,
    SYSTEM_ENVIRONMENT,
};
use crate::errors::Result;
use crate::secrets::{value_to_string, SecretData, SecretStore, VaultSecretStore};

/// Name of the source holding command line overrides.
pub const COMMAND_LINE_ARGS: &str = "commandLineArgs";

/// Base name of the configuration files.
const CONFIG_FILE_STEM: &str = "application";

/// Recognised configuration file extensions, in lookup order.
const CONFIG_FILE_EXTENSIONS: [&str; 4] = ["yml", "yaml", "toml", "json"];

/// Result of loading configuration.
pub struct LoadedConfiguration {
    /// The populated property chain.
    pub source: ConfigSource,
    /// Vault settings resolved from the chain.
    pub vault: VaultSettings,
    /// Secret store client, when Vault is configured.
    pub store: Option<Arc<dyn SecretStore>>,
}

impl std::fmt::Debug for LoadedConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedConfiguration")
            .field("source", &self.source.names())
            .field("vault", &self.vault)
            .field("store", &self.store.as_ref().map(|s| s.describe()))
            .finish()
    }
}

/// Builder for the startup property chain.
pub struct ConfigLoader {
    config_dir: PathBuf,
    profiles: Vec<String>,
    environment: Option<EnvironmentPropertySource>,
    overrides: BTreeMap<String, String>,
    store: Option<Arc<dyn SecretStore>>,
}

impl ConfigLoader {
    /// Load configuration files from `config_dir`.
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            profiles: Vec::new(),
            environment: None,
            overrides: BTreeMap::new(),
            store: None,
        }
    }

    /// Activate additional profiles on top of `spring.profiles.active`.
    pub fn with_profiles(mut self, profiles: impl IntoIterator<Item = String>) -> Self {
        self.profiles.extend(profiles);
        self
    }

    /// Use the given environment instead of the process environment.
    pub fn with_environment(mut self, environment: EnvironmentPropertySource) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Set a property with the highest precedence.
    pub fn with_override(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.insert(key.into(), value.into());
        self
    }

    /// Use `store` instead of building a Vault client from the settings.
    pub fn with_secret_store(mut self, store: Arc<dyn SecretStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub async fn load(self) -> Result<LoadedConfiguration> {
        let mut source = ConfigSource::new();
        if !self.overrides.is_empty() {
            source.add_last(MapPropertySource::new(COMMAND_LINE_ARGS, self.overrides));
        }
        source.add_last(self.environment.unwrap_or_else(EnvironmentPropertySource::from_process));

        if let Some(path) = find_config_file(&self.config_dir, CONFIG_FILE_STEM) {
            source.add_last(FilePropertySource::load(&path)?);
            debug!(path = %path.display(), "Loaded configuration file");
        } else {
            info!(dir = %self.config_dir.display(), "No application configuration file found");
        }

        let mut profiles = source.active_profiles()?;
        for profile in self.profiles {
            if !profiles.contains(&profile) {
                profiles.push(profile);
            }
        }

        // Each profile file is inserted directly below the environment, so
        // later profiles end up with higher precedence.
        for profile in &profiles {
            let stem = format!("{}-{}", CONFIG_FILE_STEM, profile);
            if let Some(path) = find_config_file(&self.config_dir, &stem) {
                source.add_after(SYSTEM_ENVIRONMENT, FilePropertySource::load(&path)?);
                debug!(path = %path.display(), profile = %profile, "Loaded profile configuration file");
            }
        }

        let mut vault = VaultSettings::bind(&source)?;
        vault.profiles = profiles;

        let store = match self.store {
            Some(store) => Some(store),
            None => build_vault_store(&vault),
        };

        if let Some(path) = vault.import_path() {
            match store.as_deref() {
                Some(store) => import_vault_source(&mut source, store, path).await,
                None => warn!(
                    import = %vault.config_import,
                    "Vault config import requested but no Vault client is configured"
                ),
            }
        }

        info!(sources = ?source.names(), profiles = ?vault.profiles, "Configuration sources loaded");

        Ok(LoadedConfiguration { source, vault, store })
    }
}

fn build_vault_store(vault: &VaultSettings) -> Option<Arc<dyn SecretStore>> {
    let config = vault.store_config()?;
    match VaultSecretStore::new(config) {
        Ok(store) => Some(Arc::new(store)),
        Err(e) => {
            warn!(error = %e, uri = %vault.uri, "Could not create Vault client");
            None
        }
    }
}

async fn import_vault_source(source: &mut ConfigSource, store: &dyn SecretStore, path: &str) {
    match store.read(path).await {
        Ok(Some(data)) => {
            let vault_source = MapPropertySource::new(format!("vault:{}", path), flatten(&data));
            info!(path = %path, properties = vault_source.len(), "Imported configuration from Vault");
            source.add_after(SYSTEM_ENVIRONMENT, vault_source);
        }
        Ok(None) => warn!(path = %path, "No secret found at Vault config import path"),
        Err(e) => warn!(path = %path, error = %e, "Vault config import failed; continuing without it"),
    }
}

/// Flatten secret data into dotted keys. Nested objects contribute
/// `parent.child` keys; everything else is rendered as a string.
fn flatten(data: &SecretData) -> BTreeMap<String, String> {
    fn walk(prefix: &str, value: &Value, out: &mut BTreeMap<String, String>) {
        match value {
            Value::Object(map) => {
                for (key, value) in map {
                    walk(&format!("{}.{}", prefix, key), value, out);
                }
            }
            other => {
                out.insert(prefix.to_string(), value_to_string(other));
            }
        }
    }

    let mut out = BTreeMap::new();
    for (key, value) in data {
        walk(key, value, &mut out);
    }
    out
}

fn find_config_file(dir: &Path, stem: &str) -> Option<PathBuf> {
    CONFIG_FILE_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{}.{}", stem, ext)))
        .find(|path| path.is_file())
}

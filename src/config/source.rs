//! # Property Sources
//!
//! An ordered chain of named property providers. For any key the first provider
//! in the chain that has a value wins, and the provider's name is kept so
//! diagnostics can report where a value came from.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;

use crate::errors::{Error, Result};

/// Name of the process environment source.
pub const SYSTEM_ENVIRONMENT: &str = "systemEnvironment";

/// Key listing the active deployment profiles (comma separated).
pub const ACTIVE_PROFILES_KEY: &str = "spring.profiles.active";

/// A named provider of string properties.
pub trait PropertySource: Send + Sync + fmt::Debug {
    /// Name used for provenance reporting.
    fn name(&self) -> &str;

    /// Look up `key` (dotted form, e.g. `app.name`).
    ///
    /// Returns `Ok(None)` when this source has no value for the key and an
    /// error when it has one that cannot be read as a string.
    fn get_property(&self, key: &str) -> Result<Option<String>>;
}

/// Property source backed by an in-memory map with dotted keys.
///
/// Used for values fetched from Vault and for programmatic overrides.
#[derive(Debug, Clone)]
pub struct MapPropertySource {
    name: String,
    values: BTreeMap<String, String>,
}

impl MapPropertySource {
    pub fn new(name: impl Into<String>, values: BTreeMap<String, String>) -> Self {
        Self { name: name.into(), values }
    }

    pub fn from_pairs<K, V>(name: impl Into<String>, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let values = pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self::new(name, values)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PropertySource for MapPropertySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_property(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }
}

/// Property source over environment variables with relaxed key mapping.
///
/// `app.name` resolves to `app.name` if such a variable exists, otherwise to
/// `APP_NAME`. Dots and dashes become underscores in the relaxed form.
#[derive(Clone)]
pub struct EnvironmentPropertySource {
    vars: HashMap<String, String>,
}

impl EnvironmentPropertySource {
    /// Snapshot the current process environment.
    pub fn from_process() -> Self {
        Self { vars: std::env::vars().collect() }
    }

    /// Build from an explicit variable map.
    pub fn from_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self { vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }

    /// Relaxed environment variable name for a dotted property key.
    pub fn env_var_name(key: &str) -> String {
        key.chars()
            .map(|c| match c {
                '.' | '-' => '_',
                other => other.to_ascii_uppercase(),
            })
            .collect()
    }
}

impl fmt::Debug for EnvironmentPropertySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvironmentPropertySource").field("vars", &self.vars.len()).finish()
    }
}

impl PropertySource for EnvironmentPropertySource {
    fn name(&self) -> &str {
        SYSTEM_ENVIRONMENT
    }

    fn get_property(&self, key: &str) -> Result<Option<String>> {
        if let Some(value) = self.vars.get(key) {
            return Ok(Some(value.clone()));
        }
        Ok(self.vars.get(&Self::env_var_name(key)).cloned())
    }
}

/// Property source backed by a configuration file (yml, yaml, toml or json).
pub struct FilePropertySource {
    name: String,
    config: config::Config,
}

impl FilePropertySource {
    /// Parse the file at `path`. The format is taken from the extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = config::Config::builder()
            .add_source(config::File::from(path))
            .build()
            .map_err(|e| {
                Error::config(format!("Failed to load configuration file {}: {}", path.display(), e))
            })?;

        Ok(Self { name: format!("applicationConfig: [file:{}]", path.display()), config })
    }
}

impl fmt::Debug for FilePropertySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePropertySource").field("name", &self.name).finish()
    }
}

impl PropertySource for FilePropertySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_property(&self, key: &str) -> Result<Option<String>> {
        let value = match self.config.get::<config::Value>(key) {
            Ok(value) => value,
            Err(config::ConfigError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(Error::config(format!("{} in {}: {}", key, self.name, e))),
        };

        match value.kind {
            // Keep the fractional part as written: `1.0` stays "1.0", not "1".
            config::ValueKind::Float(f) => Ok(Some(format!("{:?}", f))),
            _ => value
                .into_string()
                .map(Some)
                .map_err(|e| Error::config(format!("{} in {}: {}", key, self.name, e))),
        }
    }
}

/// Ordered chain of property sources, highest precedence first.
#[derive(Debug, Default)]
pub struct ConfigSource {
    sources: Vec<Box<dyn PropertySource>>,
}

impl ConfigSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source with the highest precedence.
    pub fn add_first(&mut self, source: impl PropertySource + 'static) {
        self.sources.insert(0, Box::new(source));
    }

    /// Add a source with the lowest precedence.
    pub fn add_last(&mut self, source: impl PropertySource + 'static) {
        self.sources.push(Box::new(source));
    }

    /// Insert a source directly after the source called `name`, or first if
    /// there is no such source.
    pub fn add_after(&mut self, name: &str, source: impl PropertySource + 'static) {
        let index = self.sources.iter().position(|s| s.name() == name).map_or(0, |i| i + 1);
        self.sources.insert(index, Box::new(source));
    }

    pub fn sources(&self) -> impl Iterator<Item = &dyn PropertySource> + '_ {
        self.sources.iter().map(|s| s.as_ref())
    }

    pub fn names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Resolve `key` against the chain.
    pub fn get_property(&self, key: &str) -> Result<Option<String>> {
        Ok(self.resolve(key)?.map(|(value, _)| value))
    }

    /// Resolve `key`, falling back to `default` when no source has it.
    pub fn get_or(&self, key: &str, default: &str) -> Result<String> {
        Ok(self.get_property(key)?.unwrap_or_else(|| default.to_string()))
    }

    /// Resolve `key` together with the source that supplied it.
    pub fn resolve(&self, key: &str) -> Result<Option<(String, &dyn PropertySource)>> {
        for source in &self.sources {
            if let Some(value) = source.get_property(key)? {
                return Ok(Some((value, source.as_ref())));
            }
        }
        Ok(None)
    }

    /// Active deployment profiles, in declaration order.
    pub fn active_profiles(&self) -> Result<Vec<String>> {
        Ok(self.get_property(ACTIVE_PROFILES_KEY)?.map(|v| parse_profiles(&v)).unwrap_or_default())
    }
}

/// Split a comma separated profile list, dropping blanks and duplicates.
pub fn parse_profiles(value: &str) -> Vec<String> {
    let mut profiles: Vec<String> = Vec::new();
    for profile in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if !profiles.iter().any(|p| p == profile) {
            profiles.push(profile.to_string());
        }
    }
    profiles
}

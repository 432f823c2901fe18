//! Property provenance: which source supplied each value.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ConfigSource;
use crate::errors::Result;
use crate::secrets::{is_sensitive_key, MASK};

/// Keys whose provenance is reported at startup. The password is left out on
/// purpose.
pub const DIAGNOSTIC_KEYS: [&str; 5] =
    ["app.name", "app.version", "app.message", "database.username", "database.url"];

/// Substring marking a property source as backed by Vault.
pub const VAULT_SOURCE_MARKER: &str = "vault";

/// Whether a property source name denotes Vault.
pub fn is_vault_source(source_name: &str) -> bool {
    source_name.contains(VAULT_SOURCE_MARKER)
}

/// Where a resolved property came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyProvenance {
    pub key: String,
    /// Resolved value, `***` for sensitive keys
    pub value: String,
    pub source_name: String,
    pub from_vault: bool,
}

impl PropertyProvenance {
    /// Resolve `key` and the source supplying it. `None` when no source has it.
    pub fn lookup(source: &ConfigSource, key: &str) -> Result<Option<Self>> {
        let Some((value, provider)) = source.resolve(key)? else {
            return Ok(None);
        };

        let value = if is_sensitive_key(key) { MASK.to_string() } else { value };
        let source_name = provider.name().to_string();
        let from_vault = is_vault_source(&source_name);

        Ok(Some(Self { key: key.to_string(), value, source_name, from_vault }))
    }

    fn log(&self) {
        if self.from_vault {
            info!(
                key = %self.key,
                source = %self.source_name,
                "  ✓ {}: '{}' (from: {})",
                self.key,
                self.value,
                self.source_name
            );
        } else {
            warn!(
                key = %self.key,
                source = %self.source_name,
                "  ⚠ {}: '{}' (from: {} - NOT from Vault)",
                self.key,
                self.value,
                self.source_name
            );
        }
    }
}

/// Report the provenance of each key. Lookup failures are logged at debug
/// level and skipped.
pub fn report_property_provenance(source: &ConfigSource, keys: &[&str]) -> Vec<PropertyProvenance> {
    info!("Property Sources Analysis:");

    let mut report = Vec::with_capacity(keys.len());
    for key in keys {
        match PropertyProvenance::lookup(source, key) {
            Ok(Some(provenance)) => {
                provenance.log();
                report.push(provenance);
            }
            Ok(None) => debug!(key = %key, "Property not set by any source"),
            Err(e) => debug!(key = %key, error = %e, "Could not analyze property source"),
        }
    }
    report
}

//! # Startup Diagnostics
//!
//! Operator-facing report of where configuration came from: the Vault paths in
//! play and the source of each interesting property. Runs once after startup,
//! read-only, and never fails.

pub mod provenance;
pub mod topology;

pub use provenance::{
    is_vault_source, report_property_provenance, PropertyProvenance, DIAGNOSTIC_KEYS,
    VAULT_SOURCE_MARKER,
};
pub use topology::{application_path, ImportedSecretPath, VaultTopology};

use tracing::info;

use crate::config::{ConfigSource, VaultSettings};

/// Result of a full diagnostic run.
#[derive(Debug, Clone)]
pub struct DiagnosticReport {
    pub topology: VaultTopology,
    pub provenance: Vec<PropertyProvenance>,
}

/// Reports Vault topology and property provenance over the loaded configuration.
pub struct DiagnosticReporter<'a> {
    source: &'a ConfigSource,
    vault: &'a VaultSettings,
}

impl<'a> DiagnosticReporter<'a> {
    pub fn new(source: &'a ConfigSource, vault: &'a VaultSettings) -> Self {
        Self { source, vault }
    }

    /// Log the Vault connection settings and the derived secret paths.
    pub fn report_vault_topology(&self) -> VaultTopology {
        info!(uri = %self.vault.uri, "Vault URI: {}", self.vault.uri);
        info!(backend = %self.vault.backend, "Vault KV Backend: {}", self.vault.backend);
        info!(import = %self.vault.config_import, "Config Import: {}", self.vault.config_import);
        info!(
            application = %self.vault.application_name,
            "Application Name: {}",
            self.vault.application_name
        );

        let topology = VaultTopology::derive(self.vault);
        topology.log();
        topology
    }

    /// Log which source supplied each of `keys`.
    pub fn report_property_provenance(&self, keys: &[&str]) -> Vec<PropertyProvenance> {
        report_property_provenance(self.source, keys)
    }

    /// Full report over [`DIAGNOSTIC_KEYS`].
    pub fn run(&self) -> DiagnosticReport {
        info!("========== Vault Configuration Details ==========");
        let topology = self.report_vault_topology();
        let provenance = self.report_property_provenance(&DIAGNOSTIC_KEYS);
        info!("Application successfully loaded configuration from Vault!");
        info!("=================================================");

        DiagnosticReport { topology, provenance }
    }
}

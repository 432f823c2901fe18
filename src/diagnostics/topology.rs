//! Vault path topology derived from configuration.
//!
//! Pure string composition; nothing here talks to Vault.

use serde::Serialize;
use tracing::info;

use crate::config::VaultSettings;

/// Paths implied by a `vault://` config import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportedSecretPath {
    /// Path after the `vault://` scheme
    pub secret_path: String,
    /// `<backend>/<secret_path>`
    pub full_path: String,
    /// `<uri>/v1/<backend>/data/<secret_path>`
    pub api_endpoint: String,
}

/// Secret paths the application is expected to read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VaultTopology {
    pub imported: Option<ImportedSecretPath>,
    /// `<backend>/data/<app-path>` and `<backend>/data/application`
    pub application_paths: Vec<String>,
    /// Both templates qualified by each active profile, in profile order
    pub profile_paths: Vec<String>,
}

/// Application name as a path: every `-` starts a new segment.
pub fn application_path(application_name: &str) -> String {
    application_name.replace('-', "/")
}

impl VaultTopology {
    pub fn derive(settings: &VaultSettings) -> Self {
        let backend = &settings.backend;

        let imported = settings.import_path().map(|secret_path| ImportedSecretPath {
            secret_path: secret_path.to_string(),
            full_path: format!("{}/{}", backend, secret_path),
            api_endpoint: format!("{}/v1/{}/data/{}", settings.uri, backend, secret_path),
        });

        let app_path = application_path(&settings.application_name);
        let application_paths = vec![
            format!("{}/data/{}", backend, app_path),
            format!("{}/data/application", backend),
        ];

        let profile_paths = settings
            .profiles
            .iter()
            .flat_map(|profile| {
                [
                    format!("{}/data/{},{}", backend, app_path, profile),
                    format!("{}/data/application,{}", backend, profile),
                ]
            })
            .collect();

        Self { imported, application_paths, profile_paths }
    }

    /// Emit the path report.
    pub fn log(&self) {
        info!("Vault Secret Paths:");

        if let Some(imported) = &self.imported {
            info!(path = %imported.secret_path, "  -> Primary Path: {}", imported.secret_path);
            info!(path = %imported.full_path, "  -> Full Vault Path: {}", imported.full_path);
            info!(endpoint = %imported.api_endpoint, "  -> API Endpoint: {}", imported.api_endpoint);
        }

        info!("  -> Application-based paths:");
        for path in &self.application_paths {
            info!(path = %path, "    * {}", path);
        }

        if !self.profile_paths.is_empty() {
            info!("  -> Profile-based paths:");
            for path in &self.profile_paths {
                info!(path = %path, "    * {}", path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn settings(import: &str, app: &str, profiles: &[&str]) -> VaultSettings {
        VaultSettings {
            uri: "http://127.0.0.1:8200".into(),
            backend: "secret".into(),
            config_import: import.into(),
            application_name: app.into(),
            profiles: profiles.iter().map(|p| p.to_string()).collect(),
            ..VaultSettings::default()
        }
    }

    #[test]
    fn test_paths_with_profile() {
        let topology = VaultTopology::derive(&settings("N/A", "demo-app", &["dev"]));
        assert_eq!(
            topology.application_paths,
            vec!["secret/data/demo/app", "secret/data/application"]
        );
        assert_eq!(
            topology.profile_paths,
            vec!["secret/data/demo/app,dev", "secret/data/application,dev"]
        );
        assert!(topology.imported.is_none());
    }

    #[test]
    fn test_profile_paths_follow_profile_order() {
        let topology = VaultTopology::derive(&settings("N/A", "demo", &["dev", "local"]));
        assert_eq!(
            topology.profile_paths,
            vec![
                "secret/data/demo,dev",
                "secret/data/application,dev",
                "secret/data/demo,local",
                "secret/data/application,local",
            ]
        );
    }

    #[test]
    fn test_no_profiles() {
        let topology = VaultTopology::derive(&settings("N/A", "multi-part-name", &[]));
        assert_eq!(topology.application_paths[0], "secret/data/multi/part/name");
        assert!(topology.profile_paths.is_empty());
    }

    #[test]
    fn test_imported_paths() {
        let topology = VaultTopology::derive(&settings("vault://secret/demo/config", "demo-app", &[]));
        assert_eq!(
            topology.imported,
            Some(ImportedSecretPath {
                secret_path: "secret/demo/config".into(),
                full_path: "secret/secret/demo/config".into(),
                api_endpoint: "http://127.0.0.1:8200/v1/secret/data/secret/demo/config".into(),
            })
        );
    }

    #[test]
    fn test_non_vault_import_is_ignored() {
        let topology = VaultTopology::derive(&settings("configserver:http://config", "demo", &[]));
        assert!(topology.imported.is_none());
        assert_eq!(topology.application_paths.len(), 2);
    }

    #[traced_test]
    #[test]
    fn test_log_skips_empty_profile_group() {
        VaultTopology::derive(&settings("N/A", "demo-app", &[])).log();
        assert!(logs_contain("secret/data/demo/app"));
        assert!(!logs_contain("Profile-based paths"));
        assert!(!logs_contain("Primary Path"));
    }
}

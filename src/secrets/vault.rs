//! HashiCorp Vault secret store implementation.
//!
//! Reads secrets from Vault's KV v2 secrets engine through `vaultrs`.
//!
//! Paths are full logical paths whose first segment is the KV mount. Both the
//! API form (`secret/data/demo/config`) and the logical form
//! (`secret/demo/config`) address the same secret.
//!
//! # Example
//!
//! ```rust,ignore
//! use vault_demo::secrets::{SecretStore, VaultSecretStore, VaultStoreConfig};
//!
//! let store = VaultSecretStore::new(VaultStoreConfig {
//!     address: "http://127.0.0.1:8200".to_string(),
//!     token: Some("root".into()),
//!     namespace: None,
//! })?;
//! let data = store.read("secret/data/demo/config").await?;
//! ```

use async_trait::async_trait;
use vaultrs::client::{VaultClient, VaultClientSettingsBuilder};
use vaultrs::error::ClientError;
use vaultrs::kv2;

use super::client::{SecretData, SecretStore};
use super::error::{Result, SecretsError};
use super::types::SecretString;

/// Connection settings for a Vault server.
#[derive(Debug, Clone)]
pub struct VaultStoreConfig {
    /// Vault server address (e.g., "http://127.0.0.1:8200")
    pub address: String,

    /// Vault authentication token
    pub token: Option<SecretString>,

    /// Vault namespace (Enterprise)
    pub namespace: Option<String>,
}

/// Vault KV v2 secret store.
///
/// Construction does not contact the server; the first read does. This keeps
/// an unreachable Vault from blocking startup.
pub struct VaultSecretStore {
    client: VaultClient,
    address: String,
}

impl std::fmt::Debug for VaultSecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultSecretStore")
            .field("address", &self.address)
            .field("client", &"[VaultClient]")
            .finish()
    }
}

impl VaultSecretStore {
    /// Creates a Vault store from the given configuration.
    ///
    /// # Errors
    ///
    /// - [`SecretsError::ConfigError`] if the address is empty or the settings are invalid
    pub fn new(config: VaultStoreConfig) -> Result<Self> {
        if config.address.trim().is_empty() {
            return Err(SecretsError::config_error("Vault address cannot be empty"));
        }

        let mut settings_builder = VaultClientSettingsBuilder::default();
        settings_builder.address(&config.address);

        if let Some(ref token) = config.token {
            settings_builder.token(token.expose_secret());
        }

        if let Some(namespace) = config.namespace {
            settings_builder.namespace(Some(namespace));
        }

        let settings = settings_builder.build().map_err(|e| {
            SecretsError::config_error(format!("Invalid Vault configuration: {}", e))
        })?;

        let client = VaultClient::new(settings).map_err(|e| {
            SecretsError::config_error(format!("Failed to create Vault client: {}", e))
        })?;

        tracing::debug!(address = %config.address, "Created Vault client");

        Ok(Self { client, address: config.address })
    }
}

/// Split a full logical path into its KV mount and the secret path inside it.
///
/// A `data/` segment directly after the mount is the KV v2 API prefix and is
/// dropped, so `secret/data/demo/config` and `secret/demo/config` both yield
/// `("secret", "demo/config")`.
pub fn split_kv2_path(path: &str) -> Result<(&str, &str)> {
    let trimmed = path.trim_matches('/');
    let (mount, rest) = trimmed
        .split_once('/')
        .ok_or_else(|| SecretsError::invalid_path(path, "expected <mount>/<secret path>"))?;

    let secret = match rest {
        "data" => "",
        _ => rest.strip_prefix("data/").unwrap_or(rest),
    };
    if mount.is_empty() || secret.is_empty() {
        return Err(SecretsError::invalid_path(path, "expected <mount>/<secret path>"));
    }

    Ok((mount, secret))
}

fn map_client_error(path: &str, err: ClientError) -> SecretsError {
    match err {
        ClientError::APIError { code, errors } if code == 401 || code == 403 => {
            SecretsError::authentication_failed(format!(
                "Vault rejected the request for '{}' (status {}): {}",
                path,
                code,
                errors.join(", ")
            ))
        }
        ClientError::APIError { code, errors } => SecretsError::backend_error(format!(
            "Vault returned status {} for '{}': {}",
            code,
            path,
            errors.join(", ")
        )),
        other => SecretsError::connection_failed(format!(
            "Failed to read '{}' from Vault: {}",
            path, other
        )),
    }
}

#[async_trait]
impl SecretStore for VaultSecretStore {
    async fn read(&self, path: &str) -> Result<Option<SecretData>> {
        let (mount, secret) = split_kv2_path(path)?;

        match kv2::read::<SecretData>(&self.client, mount, secret).await {
            Ok(data) => Ok(Some(data)),
            Err(ClientError::APIError { code: 404, .. }) => {
                tracing::debug!(path = %path, "No secret stored at path");
                Ok(None)
            }
            Err(e) => Err(map_client_error(path, e)),
        }
    }

    fn describe(&self) -> String {
        format!("Vault at {}", self.address)
    }
}

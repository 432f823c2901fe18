//! # Vault Health Probe
//!
//! Verifies that the secret store is reachable and serving data at a fixed
//! path: once at startup (logging only) and on demand for the health endpoint.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::secrets::{is_sensitive_key, value_to_string, SecretStore, MASK};

/// Path read by the probe. Fixed, independent of the configured backend.
pub const DIAGNOSTIC_SECRET_PATH: &str = "secret/data/demo/config";

/// Reason reported when no secret store client exists.
pub const REASON_CLIENT_UNAVAILABLE: &str = "VaultTemplate not available";

/// Reason reported when the store has nothing at the probed path.
pub const REASON_NO_RESPONSE: &str = "No response from Vault";

/// Up/down state of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Up,
    Down,
}

/// Health check result with details
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub status: Status,
    pub details: BTreeMap<String, String>,
}

impl HealthStatus {
    pub fn up() -> Self {
        Self { status: Status::Up, details: BTreeMap::new() }
    }

    /// A DOWN status carrying `reason`.
    pub fn down<S: Into<String>>(reason: S) -> Self {
        Self { status: Status::Down, details: BTreeMap::new() }.with_detail("reason", reason)
    }

    pub fn with_detail<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    pub fn is_up(&self) -> bool {
        self.status == Status::Up
    }

    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details.get(key).map(String::as_str)
    }
}

/// Probe of the secret store. Holds an optional client: an absent client is
/// reported, never treated as an error.
#[derive(Clone)]
pub struct HealthProbe {
    store: Option<Arc<dyn SecretStore>>,
}

impl std::fmt::Debug for HealthProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthProbe")
            .field("store", &self.store.as_ref().map(|s| s.describe()))
            .finish()
    }
}

impl HealthProbe {
    pub fn new(store: Option<Arc<dyn SecretStore>>) -> Self {
        Self { store }
    }

    /// The probed store, if any.
    pub fn store(&self) -> Option<Arc<dyn SecretStore>> {
        self.store.clone()
    }

    /// Startup connectivity check. Logs the outcome; never fails.
    pub async fn check_once(&self) {
        info!("Testing Vault Connection and Secret Access...");

        let Some(store) = self.store.as_ref() else {
            warn!("VaultTemplate is not available - Vault connection may not be configured");
            return;
        };

        info!(backend = %store.describe(), "Testing Vault server connection...");
        info!(path = DIAGNOSTIC_SECRET_PATH, "Attempting to read from path: {}", DIAGNOSTIC_SECRET_PATH);

        match store.read(DIAGNOSTIC_SECRET_PATH).await {
            Ok(Some(data)) if !data.is_empty() => {
                let keys: Vec<&str> = data.keys().map(String::as_str).collect();
                info!("Successfully connected to Vault!");
                info!("Secret metadata:");
                info!("  -> Path: {}", DIAGNOSTIC_SECRET_PATH);
                info!("  -> Keys available: {:?}", keys);
                info!("  -> Total properties: {}", data.len());

                for (key, value) in &data {
                    if is_sensitive_key(key) {
                        info!("  -> {}: {}", key, MASK);
                    } else {
                        info!("  -> {}: {}", key, value_to_string(value));
                    }
                }
            }
            Ok(_) => {
                warn!(
                    path = DIAGNOSTIC_SECRET_PATH,
                    "Vault responded but no data found at path: {}",
                    DIAGNOSTIC_SECRET_PATH
                );
            }
            Err(e) => {
                error!("Failed to connect to Vault or read secrets: {}", e);
                debug!(error = ?e, "Vault connection error details");
            }
        }
    }

    /// On-demand health: UP with the secret count, or DOWN with a reason.
    pub async fn health(&self) -> HealthStatus {
        let Some(store) = self.store.as_ref() else {
            return HealthStatus::down(REASON_CLIENT_UNAVAILABLE);
        };

        match store.read(DIAGNOSTIC_SECRET_PATH).await {
            Ok(Some(data)) => HealthStatus::up()
                .with_detail("vault-path", DIAGNOSTIC_SECRET_PATH)
                .with_detail("secrets-count", data.len().to_string()),
            Ok(None) => HealthStatus::down(REASON_NO_RESPONSE),
            Err(e) => HealthStatus::down(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::{Result, SecretData, SecretsError};
    use async_trait::async_trait;
    use serde_json::json;
    use tracing_test::traced_test;

    enum Reply {
        Data(SecretData),
        Missing,
        Fail,
    }

    struct FakeStore(Reply);

    #[async_trait]
    impl SecretStore for FakeStore {
        async fn read(&self, path: &str) -> Result<Option<SecretData>> {
            assert_eq!(path, DIAGNOSTIC_SECRET_PATH);
            match &self.0 {
                Reply::Data(data) => Ok(Some(data.clone())),
                Reply::Missing => Ok(None),
                Reply::Fail => Err(SecretsError::connection_failed("connection refused")),
            }
        }

        fn describe(&self) -> String {
            "fake".to_string()
        }
    }

    fn probe(reply: Reply) -> HealthProbe {
        HealthProbe::new(Some(Arc::new(FakeStore(reply))))
    }

    fn demo_data() -> SecretData {
        let mut data = SecretData::new();
        data.insert("app.name".into(), json!("demo-app"));
        data.insert("database.password".into(), json!("mysecretpass"));
        data
    }

    #[tokio::test]
    async fn test_health_up_with_count() {
        let status = probe(Reply::Data(demo_data())).health().await;
        assert!(status.is_up());
        assert_eq!(status.detail("vault-path"), Some(DIAGNOSTIC_SECRET_PATH));
        assert_eq!(status.detail("secrets-count"), Some("2"));
    }

    #[tokio::test]
    async fn test_health_up_with_empty_secret() {
        let status = probe(Reply::Data(SecretData::new())).health().await;
        assert!(status.is_up());
        assert_eq!(status.detail("secrets-count"), Some("0"));
    }

    #[tokio::test]
    async fn test_health_down_without_client() {
        let status = HealthProbe::new(None).health().await;
        assert_eq!(status, HealthStatus::down("VaultTemplate not available"));
    }

    #[tokio::test]
    async fn test_health_down_on_missing_secret() {
        let status = probe(Reply::Missing).health().await;
        assert_eq!(status.status, Status::Down);
        assert_eq!(status.detail("reason"), Some(REASON_NO_RESPONSE));
    }

    #[tokio::test]
    async fn test_health_down_on_failure() {
        let status = probe(Reply::Fail).health().await;
        assert_eq!(status.status, Status::Down);
        assert_eq!(status.detail("reason"), Some("Backend connection failed: connection refused"));
    }

    #[test]
    fn test_health_status_serialization() {
        let json = serde_json::to_value(HealthStatus::down("boom")).unwrap();
        assert_eq!(json, json!({"status": "DOWN", "details": {"reason": "boom"}}));
    }

    #[traced_test]
    #[tokio::test]
    async fn test_check_once_masks_passwords() {
        probe(Reply::Data(demo_data())).check_once().await;
        assert!(logs_contain("Successfully connected to Vault!"));
        assert!(logs_contain("app.name: demo-app"));
        assert!(logs_contain("database.password: ***"));
        assert!(!logs_contain("mysecretpass"));
    }

    #[traced_test]
    #[tokio::test]
    async fn test_check_once_without_client_warns() {
        HealthProbe::new(None).check_once().await;
        assert!(logs_contain("VaultTemplate is not available"));
    }

    #[traced_test]
    #[tokio::test]
    async fn test_check_once_empty_data_warns() {
        probe(Reply::Missing).check_once().await;
        assert!(logs_contain("no data found at path"));
    }

    #[traced_test]
    #[tokio::test]
    async fn test_check_once_empty_secret_warns() {
        probe(Reply::Data(SecretData::new())).check_once().await;
        assert!(logs_contain("Vault responded but no data found at path"));
        assert!(!logs_contain("Successfully connected to Vault!"));
    }

    #[traced_test]
    #[tokio::test]
    async fn test_check_once_failure_is_logged_not_raised() {
        probe(Reply::Fail).check_once().await;
        assert!(logs_contain("Failed to connect to Vault or read secrets"));
        assert!(logs_contain("connection refused"));
    }
}

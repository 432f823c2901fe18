//! Core secret store trait.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;

use super::error::Result;

/// Key/value data of a single secret, ordered by key.
pub type SecretData = BTreeMap<String, Value>;

/// Read-only access to a path-addressed key/value secret store.
///
/// The store is only ever read: there is no write, rotate or delete path.
///
/// # Security Considerations
///
/// - Implementations MUST NOT log secret values
/// - Failures SHOULD carry a human-readable message without secret material
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Read the secret stored at `path`.
    ///
    /// `path` is a full logical path including the mount, e.g.
    /// `secret/data/demo/config` or `secret/demo/config`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(data))` when the secret exists (the map may be empty)
    /// - `Ok(None)` when the store has nothing at that path
    ///
    /// # Errors
    ///
    /// - [`SecretsError::ConnectionFailed`](super::SecretsError::ConnectionFailed) if the store is unreachable
    /// - [`SecretsError::AuthenticationFailed`](super::SecretsError::AuthenticationFailed) if the token is rejected
    async fn read(&self, path: &str) -> Result<Option<SecretData>>;

    /// Human-readable description of the backend, used in log lines.
    fn describe(&self) -> String;
}

/// Render a secret value as a plain string.
///
/// Strings are rendered without quotes; other JSON values use their JSON form.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

//! Secret store access for configuration and credentials.
//!
//! The service reads its configuration and database credentials from a
//! path-addressed key/value store (HashiCorp Vault, KV v2). Access goes through
//! the read-only [`SecretStore`] trait so the loader and the health probe can be
//! exercised against in-memory stores in tests.
//!
//! # Security Considerations
//!
//! - Secret values are never logged unmasked
//! - The database password and Vault token live in [`SecretString`]
//! - There is no write path to the store

pub mod client;
pub mod error;
pub mod types;
pub mod vault;

pub use client::{value_to_string, SecretData, SecretStore};
pub use error::{Result, SecretsError};
pub use types::{is_sensitive_key, mask_password, SecretString, MASK};
pub use vault::{split_kv2_path, VaultSecretStore, VaultStoreConfig};

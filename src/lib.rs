//! # Vault Demo
//!
//! A small HTTP service that loads its configuration from HashiCorp Vault on
//! top of local configuration files and the environment, and reports where
//! each value came from.
//!
//! ## Architecture
//!
//! ```text
//! application.yml ─┐
//! profiles ────────┼─> ConfigSource ─> typed settings ─> REST API
//! Vault KV v2 ─────┤         │
//! environment ─────┘         └──────> startup diagnostics, health probe
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use vault_demo::{api, config::ConfigLoader, startup::AppContext, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let loaded = ConfigLoader::new(".").load().await?;
//!     let context = AppContext::from_loaded(loaded)?;
//!     let listener = api::bind_listener(&context.server).await?;
//!     context.serve(listener, api::shutdown_signal()).await
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod errors;
pub mod observability;
pub mod secrets;
pub mod startup;

// Re-export commonly used types and traits
pub use crate::config::{AppSettings, ConfigLoader, ConfigSource, DatabaseSettings};
pub use errors::{Error, Result};
pub use observability::{init_logging, HealthProbe, HealthStatus, ObservabilityConfig};
pub use secrets::{mask_password, SecretStore};
pub use startup::AppContext;

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

//! # Observability
//!
//! Structured logging setup and the Vault health probe.

pub mod health;
pub mod logging;

pub use health::{
    HealthProbe, HealthStatus, Status, DIAGNOSTIC_SECRET_PATH, REASON_CLIENT_UNAVAILABLE,
    REASON_NO_RESPONSE,
};
pub use logging::{init_logging, ObservabilityConfig};

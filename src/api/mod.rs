//! # REST API
//!
//! HTTP surface of the demo service: the bound configuration (password always
//! redacted), a fixed liveness response and the Vault health indicator.

pub mod handlers;
pub mod routes;
pub mod server;

pub use routes::{build_router, ApiState};
pub use server::{bind_listener, serve, shutdown_signal};

//! HTTP request handlers organized by resource type

pub mod config;
pub mod health;

pub use self::config::{get_config_handler, AppConfigView, ConfigResponse, DatabaseConfigView};
pub use health::{actuator_health_handler, api_health_handler, ApiHealthResponse};

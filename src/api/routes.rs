use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::config::{AppSettings, DatabaseSettings};
use crate::observability::HealthProbe;

use super::handlers::{actuator_health_handler, api_health_handler, get_config_handler};

/// Shared, read-only state handed to every handler.
#[derive(Debug, Clone)]
pub struct ApiState {
    pub app: Arc<AppSettings>,
    pub database: Arc<DatabaseSettings>,
    pub probe: HealthProbe,
}

impl ApiState {
    pub fn new(app: Arc<AppSettings>, database: Arc<DatabaseSettings>, probe: HealthProbe) -> Self {
        Self { app, database, probe }
    }
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/api/config", get(get_config_handler))
        .route("/api/health", get(api_health_handler))
        .route("/actuator/health", get(actuator_health_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

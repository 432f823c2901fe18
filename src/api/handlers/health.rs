//! Health endpoints
//!
//! `/api/health` is a liveness response that always reports UP and does not
//! consult Vault. `/actuator/health` exposes the Vault [`HealthProbe`] result
//! for monitoring systems.
//!
//! [`HealthProbe`]: crate::observability::HealthProbe

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::api::routes::ApiState;
use crate::observability::HealthStatus;

/// Body of `GET /api/health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiHealthResponse {
    /// Always "UP" when responding
    pub status: String,
    /// The configured `app.message`
    pub message: String,
}

pub async fn api_health_handler(State(state): State<ApiState>) -> Json<ApiHealthResponse> {
    Json(ApiHealthResponse { status: "UP".to_string(), message: state.app.message.clone() })
}

/// Returns 200 when Vault is reachable at the probed path, 503 otherwise.
pub async fn actuator_health_handler(
    State(state): State<ApiState>,
) -> (StatusCode, Json<HealthStatus>) {
    let health = state.probe.health().await;
    let status = if health.is_up() { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status, Json(health))
}

//! Configuration endpoint

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::api::routes::ApiState;
use crate::config::{AppSettings, DatabaseSettings};
use crate::secrets::MASK;

/// Application section of the configuration response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfigView {
    pub name: String,
    pub version: String,
    pub message: String,
}

/// Database section of the configuration response. The password is never
/// echoed; the field is always the fixed mask.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfigView {
    pub username: String,
    pub password: String,
    pub url: String,
}

/// Body of `GET /api/config`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigResponse {
    pub app: AppConfigView,
    pub database: DatabaseConfigView,
}

impl ConfigResponse {
    pub fn from_settings(app: &AppSettings, database: &DatabaseSettings) -> Self {
        Self {
            app: AppConfigView {
                name: app.name.clone(),
                version: app.version.clone(),
                message: app.message.clone(),
            },
            database: DatabaseConfigView {
                username: database.username.clone(),
                password: MASK.to_string(),
                url: database.url.clone(),
            },
        }
    }
}

pub async fn get_config_handler(State(state): State<ApiState>) -> Json<ConfigResponse> {
    Json(ConfigResponse::from_settings(&state.app, &state.database))
}

//! Shared helpers for integration tests
#![allow(dead_code)]

use std::path::Path;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use vault_demo::config::EnvironmentPropertySource;

/// Environment with no variables, so the host environment cannot leak in.
pub fn empty_environment() -> EnvironmentPropertySource {
    EnvironmentPropertySource::from_vars(Vec::<(String, String)>::new())
}

pub fn write_config(dir: &Path, file_name: &str, contents: &str) {
    std::fs::write(dir.join(file_name), contents).expect("write config file");
}

/// Body Vault returns for a KV v2 read.
pub fn kv2_read_response(data: Value) -> Value {
    json!({
        "request_id": "6a5ee8a4-4b1e-8b5c-9c5b-2f6d3f8f0e11",
        "lease_id": "",
        "renewable": false,
        "lease_duration": 0,
        "data": {
            "data": data,
            "metadata": {
                "created_time": "2024-01-01T00:00:00.000000Z",
                "custom_metadata": null,
                "deletion_time": "",
                "destroyed": false,
                "version": 1
            }
        },
        "wrap_info": null,
        "warnings": null,
        "auth": null
    })
}

pub async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).expect("build request");
    let response = router.oneshot(request).await.expect("router response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("read body");
    let body = serde_json::from_slice(&bytes).expect("json body");
    (status, body)
}

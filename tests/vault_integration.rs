//! Vault-backed loading and health checks against a mock Vault server.

mod common;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vault_demo::config::ConfigLoader;
use vault_demo::diagnostics::DiagnosticReporter;
use vault_demo::observability::HealthProbe;
use vault_demo::secrets::{SecretStore, SecretsError, VaultSecretStore, VaultStoreConfig};
use vault_demo::AppContext;

use common::{empty_environment, kv2_read_response, write_config};

const ROOT_TOKEN: &str = "root-token";

fn store(server: &MockServer) -> VaultSecretStore {
    VaultSecretStore::new(VaultStoreConfig {
        address: server.uri(),
        token: Some(ROOT_TOKEN.into()),
        namespace: None,
    })
    .expect("vault client")
}

async fn mount_demo_secret(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/secret/data/demo/config"))
        .and(header("X-Vault-Token", ROOT_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(kv2_read_response(json!({
            "app.name": "demo-app",
            "app.version": "2.0.0",
            "app.message": "Hello from Vault!",
            "database.username": "vault_user",
            "database.password": "mysecretpass"
        }))))
        .mount(server)
        .await;
}

#[tokio::test]
async fn reads_kv2_secret_data() {
    let server = MockServer::start().await;
    mount_demo_secret(&server).await;

    let data = store(&server).read("secret/data/demo/config").await.unwrap().unwrap();
    assert_eq!(data.len(), 5);
    assert_eq!(data["app.name"], "demo-app");

    // Logical form addresses the same secret
    let logical = store(&server).read("secret/demo/config").await.unwrap();
    assert_eq!(logical, Some(data));
}

#[tokio::test]
async fn missing_secret_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/secret/data/demo/config"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"errors": []})))
        .mount(&server)
        .await;

    assert_eq!(store(&server).read("secret/data/demo/config").await.unwrap(), None);

    let health = HealthProbe::new(Some(std::sync::Arc::new(store(&server)))).health().await;
    assert!(!health.is_up());
    assert_eq!(health.detail("reason"), Some("No response from Vault"));
}

#[tokio::test]
async fn permission_denied_is_authentication_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/secret/data/demo/config"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"errors": ["permission denied"]})),
        )
        .mount(&server)
        .await;

    let err = store(&server).read("secret/data/demo/config").await.unwrap_err();
    assert!(matches!(err, SecretsError::AuthenticationFailed { .. }));
    assert!(err.to_string().contains("permission denied"));
}

#[tokio::test]
async fn unreachable_vault_reports_down() {
    // Reserve a port, then release it so nothing is listening there
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let address = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let store = VaultSecretStore::new(VaultStoreConfig { address, token: None, namespace: None })
        .expect("client construction does not contact the server");
    let err = store.read("secret/data/demo/config").await.unwrap_err();
    assert!(matches!(err, SecretsError::ConnectionFailed { .. }));

    let health = HealthProbe::new(Some(std::sync::Arc::new(store))).health().await;
    assert!(!health.is_up());
    assert!(health.detail("reason").is_some_and(|r| r.contains("Backend connection failed")));
}

#[tokio::test]
async fn vault_import_overrides_files_and_binds_settings() {
    let server = MockServer::start().await;
    mount_demo_secret(&server).await;

    let dir = TempDir::new().unwrap();
    write_config(
        dir.path(),
        "application.yml",
        &format!(
            r#"
spring:
  application:
    name: demo-app
  config:
    import: vault://secret/demo/config
  cloud:
    vault:
      uri: {}
      token: {}
      kv:
        backend: secret
app:
  name: file-app
  message: from file
database:
  url: jdbc:postgresql://localhost:5432/demo
"#,
            server.uri(),
            ROOT_TOKEN
        ),
    );

    let loaded =
        ConfigLoader::new(dir.path()).with_environment(empty_environment()).load().await.unwrap();
    assert_eq!(loaded.source.names()[1], "vault:secret/demo/config");
    assert!(loaded.store.is_some());

    let context = AppContext::from_loaded(loaded).unwrap();
    assert_eq!(context.app.name, "demo-app");
    assert_eq!(context.app.message, "Hello from Vault!");
    assert_eq!(context.database.username, "vault_user");
    assert_eq!(context.database.password.expose_secret(), "mysecretpass");
    assert_eq!(context.database.url, "jdbc:postgresql://localhost:5432/demo");

    let report = DiagnosticReporter::new(&context.source, &context.vault).run();
    let from_vault: Vec<&str> =
        report.provenance.iter().filter(|p| p.from_vault).map(|p| p.key.as_str()).collect();
    assert_eq!(from_vault, vec!["app.name", "app.version", "app.message", "database.username"]);
    let url = report.provenance.iter().find(|p| p.key == "database.url").unwrap();
    assert!(!url.from_vault);

    let health = context.probe.health().await;
    assert!(health.is_up());
    assert_eq!(health.detail("secrets-count"), Some("5"));
}

#[tokio::test]
async fn failed_vault_import_is_not_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"errors": ["internal"]})))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    write_config(
        dir.path(),
        "application.yml",
        &format!(
            "spring:\n  config:\n    import: vault://secret/demo/config\n  cloud:\n    vault:\n      uri: {}\napp:\n  name: file-app\n",
            server.uri()
        ),
    );

    let loaded =
        ConfigLoader::new(dir.path()).with_environment(empty_environment()).load().await.unwrap();
    assert!(!loaded.source.names().iter().any(|name| name.starts_with("vault:")));

    let context = AppContext::from_loaded(loaded).unwrap();
    assert_eq!(context.app.name, "file-app");
}

//! End-to-end startup without Vault: files, profiles, environment and CLI
//! overrides feed the endpoints, and the health probe reports DOWN.

mod common;

use axum::http::StatusCode;
use tempfile::TempDir;

use vault_demo::api::{bind_listener, build_router, serve};
use vault_demo::cli::Cli;
use vault_demo::config::EnvironmentPropertySource;
use vault_demo::AppContext;

use clap::Parser;
use common::{get_json, write_config};

fn config_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_config(
        dir.path(),
        "application.yml",
        r#"
spring:
  application:
    name: demo-app
  profiles:
    active: dev
app:
  name: demo-app
  version: 1.0.0
  message: default message
database:
  username: demo
  password: localpass
  url: jdbc:postgresql://localhost:5432/demo
"#,
    );
    write_config(dir.path(), "application-dev.yml", "app:\n  message: dev message\n");
    write_config(dir.path(), "application-local.toml", "[database]\nusername = \"local\"\n");
    dir
}

#[tokio::test]
async fn starts_and_serves_without_vault() {
    let dir = config_dir();
    let cli = Cli::try_parse_from([
        "vault-demo",
        "--config-dir",
        dir.path().to_str().unwrap(),
        "--profile",
        "local",
        "--port",
        "0",
    ])
    .unwrap();

    let environment = EnvironmentPropertySource::from_vars([("APP_VERSION", "9.9.9")]);
    let loaded = cli.loader().with_environment(environment).load().await.unwrap();
    assert!(loaded.store.is_none());
    assert_eq!(loaded.vault.profiles, vec!["dev", "local"]);

    let mut context = AppContext::from_loaded(loaded).unwrap();
    assert_eq!(context.server.port, 0);
    assert_eq!(context.app.message, "dev message");
    assert_eq!(context.app.version, "9.9.9");
    assert_eq!(context.database.username, "local");

    context.server.address = "127.0.0.1".into();
    let listener = bind_listener(&context.server).await.unwrap();
    let report = context.run_startup_diagnostics(listener.local_addr().unwrap()).await;
    assert!(report.provenance.iter().all(|p| !p.from_vault));
    assert!(report.topology.imported.is_none());

    let router = build_router(context.api_state());

    let (status, body) = get_json(router.clone(), "/api/config").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["app"]["message"], "dev message");
    assert_eq!(body["database"]["password"], "***");

    let (status, body) = get_json(router.clone(), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "UP");
    assert_eq!(body["message"], "dev message");

    let health = context.probe.health().await;
    assert!(!health.is_up());
    assert_eq!(health.detail("reason"), Some("VaultTemplate not available"));

    serve(listener, router, async {}).await.unwrap();
}

//! Startup sequence for the vault demo service
//!
//! ```text
//! load + bind configuration -> bind listener -> serve
//!                                                 + run diagnostics (once)
//! ```
//!
//! Diagnostics run exactly once, after the listener is bound, while the API is
//! already answering requests: a slow or unreachable Vault delays the report,
//! never readiness. Nothing in them is fatal.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::api::{self, build_router, ApiState};
use crate::config::{
    AppSettings, ConfigSource, DatabaseSettings, LoadedConfiguration, ServerSettings,
    VaultSettings,
};
use crate::diagnostics::{DiagnosticReport, DiagnosticReporter};
use crate::errors::{Error, Result};
use crate::observability::HealthProbe;
use crate::secrets::SecretStore;

/// Everything bound at startup, shared read-only afterwards.
#[derive(Debug)]
pub struct AppContext {
    pub source: ConfigSource,
    pub vault: VaultSettings,
    pub app: Arc<AppSettings>,
    pub database: Arc<DatabaseSettings>,
    pub server: ServerSettings,
    pub probe: HealthProbe,
}

impl AppContext {
    /// Bind the typed settings from the loaded chain and log them.
    pub fn from_loaded(loaded: LoadedConfiguration) -> Result<Self> {
        let LoadedConfiguration { source, vault, store } = loaded;

        let app = AppSettings::bind(&source)?;
        let database = DatabaseSettings::bind(&source)?;
        let server = ServerSettings::bind(&source)?;

        app.log_loaded();
        database.log_loaded();

        Ok(Self {
            source,
            vault,
            app: Arc::new(app),
            database: Arc::new(database),
            server,
            probe: HealthProbe::new(store),
        })
    }

    pub fn store(&self) -> Option<Arc<dyn SecretStore>> {
        self.probe.store()
    }

    pub fn api_state(&self) -> ApiState {
        ApiState::new(self.app.clone(), self.database.clone(), self.probe.clone())
    }

    /// Serve the API on `listener` until `shutdown` resolves, running the
    /// startup diagnostics alongside the server.
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let address = listener.local_addr()?;
        let server =
            tokio::spawn(api::serve(listener, build_router(self.api_state()), shutdown));

        self.run_startup_diagnostics(address).await;

        server.await.map_err(|e| Error::internal(format!("API server task failed: {}", e)))?
    }

    /// Vault topology and provenance report, then the connectivity check.
    pub async fn run_startup_diagnostics(&self, address: SocketAddr) -> DiagnosticReport {
        let report = DiagnosticReporter::new(&self.source, &self.vault).run();
        self.probe.check_once().await;
        display_startup_banner(address);
        report
    }
}

fn display_startup_banner(address: SocketAddr) {
    let base = format!("http://{}", address);
    info!("========== Application Ready ==========");
    info!(address = %address, "Application started successfully!");
    info!("Check configuration: {}/api/config", base);
    info!("Check health: {}/api/health", base);
    info!("Vault health: {}/actuator/health", base);
    info!("=======================================");
}

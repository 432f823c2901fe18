use clap::Parser;
use tracing::info;

use vault_demo::{
    api::{bind_listener, shutdown_signal},
    cli::Cli,
    init_logging, AppContext, ObservabilityConfig, Result, APP_NAME, VERSION,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (optional - won't fail if missing)
    // This must happen before any config is read from environment
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Error loading .env file: {}", e);
        }
    }

    let cli = Cli::parse();

    let mut observability_config = ObservabilityConfig::from_env();
    if cli.verbose {
        observability_config = observability_config.verbose();
    }
    init_logging(&observability_config);

    info!(app_name = APP_NAME, version = VERSION, "Starting Vault configuration demo");

    let loaded = cli.loader().load().await?;
    info!(sources = ?loaded.source.names(), "Loaded configuration sources");

    let context = AppContext::from_loaded(loaded)?;
    let listener = bind_listener(&context.server).await?;

    context.serve(listener, shutdown_signal()).await
}

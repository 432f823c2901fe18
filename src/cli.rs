//! # Command Line Interface

use std::path::PathBuf;

use clap::Parser;

use crate::config::ConfigLoader;

#[derive(Debug, Parser)]
#[command(name = "vault-demo")]
#[command(about = "Configuration demo service backed by HashiCorp Vault")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Directory holding application.yml and its profile variants
    #[arg(long, env = "CONFIG_DIR", default_value = ".")]
    pub config_dir: PathBuf,

    /// Additional active profile (repeatable)
    #[arg(long = "profile", value_name = "PROFILE")]
    pub profiles: Vec<String>,

    /// HTTP port override
    #[arg(long)]
    pub port: Option<u16>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Configuration loader for the parsed arguments.
    pub fn loader(&self) -> ConfigLoader {
        let loader =
            ConfigLoader::new(self.config_dir.clone()).with_profiles(self.profiles.iter().cloned());
        match self.port {
            Some(port) => loader.with_override("server.port", port.to_string()),
            None => loader,
        }
    }
}

//! # Configuration Management
//!
//! Property sources, the startup loader and the typed settings bound from them.

pub mod loader;
pub mod settings;
pub mod source;

pub use loader::{ConfigLoader, LoadedConfiguration, COMMAND_LINE_ARGS};
pub use settings::{
    AppSettings, DatabaseSettings, ServerSettings, VaultSettings, NOT_AVAILABLE,
    VAULT_IMPORT_SCHEME,
};
pub use source::{
    parse_profiles, ConfigSource, EnvironmentPropertySource, FilePropertySource,
    MapPropertySource, PropertySource, ACTIVE_PROFILES_KEY, SYSTEM_ENVIRONMENT,
};

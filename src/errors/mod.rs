//! # Error Handling
//!
//! Crate-wide error type for configuration loading, binding and the HTTP server.
//! Secret store failures have their own type in [`crate::secrets::SecretsError`].

/// Custom result type for vault-demo operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the vault-demo service
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Configuration loading and binding errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network transport errors (listener bind, serve)
    #[error("Transport error: {0}")]
    Transport(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new transport error
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport(message.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

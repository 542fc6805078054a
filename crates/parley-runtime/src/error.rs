//! Runtime error types.

use parley_framework::RegistryError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while setting up a session.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Configuration could not be loaded or failed validation.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A configured command could not be registered.
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;

//! Registry error types.

use parley_core::CommandId;
use thiserror::Error;

/// Errors returned by [`CommandRegistry`](crate::registry::CommandRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A name is already taken by a registered command or alias.
    ///
    /// Raised at startup this is a configuration bug and should abort.
    #[error("command name '{name}' is already registered by '{existing}'")]
    DuplicateCommand {
        /// The colliding name.
        name: CommandId,
        /// Canonical id of the command that owns the name.
        existing: CommandId,
    },

    /// No command or alias matches the name.
    #[error("unknown command '{name}'")]
    UnknownCommand {
        /// The name that was looked up.
        name: CommandId,
        /// Ranked suggestions, best first.
        suggestions: Vec<CommandId>,
    },

    /// The metadata cannot be registered as given.
    #[error("invalid metadata for '{id}': {reason}")]
    InvalidMetadata {
        /// The offending command id (may be empty).
        id: CommandId,
        /// Why the metadata was rejected.
        reason: String,
    },
}

impl RegistryError {
    /// Creates a [`RegistryError::InvalidMetadata`].
    pub fn invalid(id: CommandId, reason: impl Into<String>) -> Self {
        Self::InvalidMetadata {
            id,
            reason: reason.into(),
        }
    }
}

/// Result alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

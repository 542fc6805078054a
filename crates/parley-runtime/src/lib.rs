//! Parley Runtime - configuration, logging and session glue.
//!
//! This crate provides:
//! - Layered configuration (`ConfigLoader`, `ParleyConfig`)
//! - Logging setup on `tracing-subscriber` (`LoggingBuilder`)
//! - A ready-made parsing session (`Session`)
//!
//! ```ignore
//! use parley_runtime::{Session, Submission, config::load_config, logging};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = load_config()?;
//!     logging::init_from_config(&config.logging);
//!
//!     let mut session = Session::from_config(&config)?;
//!     match session.submit("build --release") {
//!         Submission::Command(parsed) => println!("{}", parsed.command()),
//!         Submission::Shell(payload) => println!("would run: {payload}"),
//!         Submission::Failed(error) => eprintln!("{error}"),
//!         Submission::Noop => {}
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Configuration files
//!
//! With the default `toml-config` feature, `parley.toml` (or
//! `config.toml`) is read from the current directory. `PARLEY_PROFILE`
//! selects a profile file such as `parley.production.toml`, and
//! `PARLEY_PARSER__SHELL_PREFIX=$` style variables override single keys.

pub mod config;
pub mod error;
pub mod logging;
pub mod session;

// Re-exports
pub use config::{ConfigError, ConfigLoader, ConfigResult, ParleyConfig, Profile};
pub use error::{RuntimeError, RuntimeResult};
pub use logging::{LoggingBuilder, LoggingError, SpanEvents};
pub use session::{Session, Submission};

// Re-export tracing for use by other crates
pub use tracing;
pub use tracing_subscriber;

/// Prelude module for convenient imports.
///
/// Brings the logging macros into scope along with the session types.
pub mod prelude {
    pub use super::{ConfigLoader, ParleyConfig, Session, Submission};
    pub use tracing::{Level, debug, error, info, instrument, span, trace, warn};
}

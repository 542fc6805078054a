//! # Parley
//!
//! A composable command-line parsing and dispatch toolkit for interactive
//! shells.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────┐     ┌──────────┐────▶ ShellStrategy ("!ls -la")   ──▶ shell payload
//! │ Session │────▶│ Pipeline │
//! └─────────┘     └──────────┘────▶ TextStrategy  ("build -v")  ──▶ CommandRegistry ──▶ ParseResult
//! ```
//!
//! - **Core**: identifiers, tokenizer, `Context`, `ParseResult`, `ParseError`
//! - **Framework**: strategies, the routing `Pipeline`, the `CommandRegistry`
//! - **Runtime**: configuration, logging and the interactive `Session`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use parley::prelude::*;
//!
//! let mut session = Session::default();
//! session.register(
//!     CommandMetadata::new("build")
//!         .alias("b")
//!         .flag("release")
//!         .option("target"),
//! )?;
//!
//! if let Submission::Command(parsed) = session.submit("b --release --target=x86") {
//!     assert_eq!(parsed.command(), "build");
//!     assert!(parsed.has_flag("release"));
//! }
//! ```
//!
//! ## Features
//!
//! - `toml-config`: read `parley.toml` configuration files (default)
//! - `yaml-config`: read `parley.yaml` configuration files
//! - `json-log`: JSON log output

pub use parley_core as core;
pub use parley_framework as framework;
pub use parley_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use parley::prelude::*;
/// ```
pub mod prelude {
    // Runtime - main entry point
    pub use parley_runtime::{ConfigLoader, ParleyConfig, Session, Submission};

    // Core data model
    pub use parley_core::{
        CommandId, CommandMetadata, Context, ParameterSpec, ParseError, ParseErrorKind,
        ParseMode, ParseResult,
    };

    // Routing and strategies - for custom pipelines
    pub use parley_framework::activation;
    pub use parley_framework::{
        CommandRegistry, OptionPolicy, ParserStrategy, Pipeline, ShellStrategy, TextStrategy,
        render_error,
    };
}

//! # Parley Framework
//!
//! Strategies, routing and the command catalog.
//!
//! - **Strategies**: the [`ParserStrategy`] trait and the built-in
//!   [`TextStrategy`] and [`ShellStrategy`]
//! - **Pipeline**: ordered, predicate-gated routing ([`Pipeline`],
//!   [`activation`])
//! - **Registry**: command metadata, alias resolution and fuzzy suggestions
//!   ([`CommandRegistry`])
//! - **Tower**: the pipeline as a `tower::Service` ([`ParseRequest`])
//! - **Reports**: plain-text error rendering ([`render_error`])
//!
//! ```text
//!                ┌──────────────┐
//! line + ctx ───▶│   Pipeline   │──▶ ShellStrategy ──▶ pass-through result
//!                └──────────────┘──▶ TextStrategy ──▶ CommandRegistry ──▶ ParseResult
//! ```

pub mod activation;
pub mod error;
pub mod fuzzy;
pub mod pipeline;
pub mod registry;
pub mod report;
pub mod service;
pub mod strategies;
pub mod strategy;

pub use activation::Activation;
pub use error::{RegistryError, RegistryResult};
pub use pipeline::Pipeline;
pub use registry::{CommandRegistry, DEFAULT_CACHE_CAPACITY, DEFAULT_SUGGESTION_LIMIT};
pub use report::render_error;
pub use service::ParseRequest;
pub use strategies::{
    DEFAULT_SHELL_COMMANDS, DEFAULT_SHELL_PREFIX, OptionPolicy, ShellStrategy, TextStrategy,
};
pub use strategy::{BoxedStrategy, ParserStrategy};

/// Prelude for common imports.
pub mod prelude {
    pub use super::activation::{self, Activation};
    pub use super::{
        BoxedStrategy, CommandRegistry, OptionPolicy, ParseRequest, ParserStrategy, Pipeline,
        RegistryError, ShellStrategy, TextStrategy, render_error,
    };
}

//! The parser strategy abstraction.
//!
//! A [`ParserStrategy`] is one interpretation of an input line: free-form
//! text commands, shell pass-through, or anything a caller plugs in. The
//! [`Pipeline`](crate::pipeline::Pipeline) holds strategies as trait objects
//! and asks each, in order, whether it wants the line.
//!
//! ```rust
//! use parley_core::{Context, ParseError, ParseMode, ParseResult};
//! use parley_framework::ParserStrategy;
//!
//! struct Echo;
//!
//! impl ParserStrategy for Echo {
//!     fn name(&self) -> &str {
//!         "echo"
//!     }
//!
//!     fn mode(&self) -> ParseMode {
//!         ParseMode::new("echo")
//!     }
//!
//!     fn can_parse(&self, line: &str, _ctx: &Context) -> bool {
//!         !line.trim().is_empty()
//!     }
//!
//!     fn parse(&self, line: &str, _ctx: &Context) -> Result<ParseResult, ParseError> {
//!         Ok(ParseResult::pass_through(self.mode(), line, line))
//!     }
//! }
//! ```

use std::sync::Arc;

use parley_core::{CommandId, Context, ParseError, ParseMode, ParseResult};

/// One way of interpreting an input line.
///
/// Implementations must be cheap to query: `can_parse` and `suggestions` run
/// on every keystroke in interactive front ends.
pub trait ParserStrategy: Send + Sync {
    /// Name used in logs and by [`Pipeline::route`](crate::pipeline::Pipeline::route).
    fn name(&self) -> &str;

    /// Mode tag stamped on every result this strategy produces.
    fn mode(&self) -> ParseMode;

    /// Returns `true` if this strategy is willing to parse `line`.
    ///
    /// Must not have side effects.
    fn can_parse(&self, line: &str, context: &Context) -> bool;

    /// Parses `line` into a result.
    fn parse(&self, line: &str, context: &Context) -> Result<ParseResult, ParseError>;

    /// Returns completion candidates for a partial line. Never fails.
    fn suggestions(&self, partial: &str, context: &Context) -> Vec<CommandId> {
        let _ = (partial, context);
        Vec::new()
    }
}

/// A shared, type-erased strategy.
pub type BoxedStrategy = Arc<dyn ParserStrategy>;

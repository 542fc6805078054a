//! The parser pipeline.
//!
//! A [`Pipeline`] holds an ordered list of strategies, each paired with an
//! [`Activation`] predicate. For every line:
//!
//! 1. Entries are checked in registration order
//! 2. The first entry whose activation and `can_parse` both accept the line
//!    parses it, and its result or error is returned unchanged
//! 3. If nothing accepts the line, [`ParseError::NoParserMatched`] is returned
//!
//! There is no implicit fallback. Put a catch-all strategy last if you want
//! one.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use parley_core::{CommandMetadata, Context};
//! use parley_framework::activation::{always, prefix};
//! use parley_framework::{CommandRegistry, Pipeline, ShellStrategy, TextStrategy};
//!
//! let registry = Arc::new(CommandRegistry::new());
//! registry.register(CommandMetadata::new("help")).unwrap();
//!
//! let pipeline = Pipeline::new()
//!     .with_strategy(Arc::new(ShellStrategy::new()), prefix('!'))
//!     .with_strategy(Arc::new(TextStrategy::new(registry)), always());
//!
//! let ctx = Context::default();
//! assert_eq!(pipeline.route("!ls", &ctx), Some("shell"));
//! assert_eq!(pipeline.parse("help", &ctx).unwrap().command(), "help");
//! ```

use std::collections::HashSet;

use parley_core::{CommandId, Context, ParseError, ParseResult};
use tracing::{Level, debug, span, trace};

use crate::activation::Activation;
use crate::strategy::BoxedStrategy;

#[derive(Clone)]
struct Entry {
    strategy: BoxedStrategy,
    activation: Activation,
}

impl Entry {
    fn accepts(&self, line: &str, context: &Context) -> bool {
        if !(self.activation)(line, context) {
            trace!(strategy = self.strategy.name(), "Activation rejected line");
            return false;
        }
        if !self.strategy.can_parse(line, context) {
            trace!(strategy = self.strategy.name(), "Strategy declined line");
            return false;
        }
        true
    }
}

/// Routes input lines to the first willing strategy.
///
/// Cloning is cheap: strategies and predicates are shared.
#[derive(Default, Clone)]
pub struct Pipeline {
    entries: Vec<Entry>,
}

impl Pipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends a strategy with its activation predicate.
    pub fn add_strategy(&mut self, strategy: BoxedStrategy, activation: Activation) {
        debug!(strategy = strategy.name(), position = self.entries.len(), "Added strategy");
        self.entries.push(Entry {
            strategy,
            activation,
        });
    }

    /// Appends a strategy (builder pattern).
    pub fn with_strategy(mut self, strategy: BoxedStrategy, activation: Activation) -> Self {
        self.add_strategy(strategy, activation);
        self
    }

    /// Removes every strategy with the given name. Returns `true` if any was
    /// removed.
    pub fn remove_strategy(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.strategy.name() != name);
        before != self.entries.len()
    }

    /// Removes all strategies.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the number of registered strategies.
    pub fn strategy_count(&self) -> usize {
        self.entries.len()
    }

    /// Returns strategy names in registration order.
    pub fn strategy_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.strategy.name()).collect()
    }

    fn select(&self, line: &str, context: &Context) -> Option<&BoxedStrategy> {
        self.entries
            .iter()
            .find(|entry| entry.accepts(line, context))
            .map(|entry| &entry.strategy)
    }

    /// Returns the name of the strategy that would parse `line`.
    pub fn route(&self, line: &str, context: &Context) -> Option<&str> {
        self.select(line, context).map(|s| s.name())
    }

    /// Parses `line` with the first strategy that accepts it.
    pub fn parse(&self, line: &str, context: &Context) -> Result<ParseResult, ParseError> {
        let span = span!(Level::DEBUG, "parse", mode = %context.mode());
        let _enter = span.enter();

        match self.select(line, context) {
            Some(strategy) => {
                debug!(strategy = strategy.name(), "Routing line");
                strategy.parse(line, context)
            }
            None => {
                debug!(strategies = self.entries.len(), "No strategy accepted line");
                Err(ParseError::no_parser_matched(line))
            }
        }
    }

    /// Collects completions from every activated strategy, in order, without
    /// duplicates.
    pub fn suggestions(&self, partial: &str, context: &Context) -> Vec<CommandId> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .filter(|entry| (entry.activation)(partial, context))
            .flat_map(|entry| entry.strategy.suggestions(partial, context))
            .filter(|candidate| seen.insert(candidate.clone()))
            .collect()
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("strategies", &self.strategy_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use parley_core::{CommandMetadata, ParseErrorKind, ParseMode};

    use super::*;
    use crate::activation::{always, mode, not, prefix};
    use crate::registry::CommandRegistry;
    use crate::strategies::{ShellStrategy, TextStrategy};
    use crate::strategy::ParserStrategy;

    struct Counting {
        name: &'static str,
        calls: Arc<AtomicUsize>,
    }

    impl ParserStrategy for Counting {
        fn name(&self) -> &str {
            self.name
        }

        fn mode(&self) -> ParseMode {
            ParseMode::new(self.name)
        }

        fn can_parse(&self, _line: &str, _context: &Context) -> bool {
            true
        }

        fn parse(&self, line: &str, _context: &Context) -> Result<ParseResult, ParseError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ParseResult::pass_through(self.mode(), line, line))
        }

        fn suggestions(&self, _partial: &str, _context: &Context) -> Vec<CommandId> {
            vec![CommandId::new("shared"), CommandId::new(self.name)]
        }
    }

    fn counting(name: &'static str) -> (BoxedStrategy, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let strategy = Arc::new(Counting {
            name,
            calls: Arc::clone(&calls),
        });
        (strategy, calls)
    }

    fn standard() -> Pipeline {
        let registry = CommandRegistry::new();
        registry
            .register(CommandMetadata::new("build").flag("release"))
            .unwrap();
        registry.register(CommandMetadata::new("bundle")).unwrap();

        Pipeline::new()
            .with_strategy(Arc::new(ShellStrategy::new()), prefix('!'))
            .with_strategy(Arc::new(TextStrategy::new(Arc::new(registry))), always())
    }

    #[test]
    fn test_empty_pipeline_matches_nothing() {
        let err = Pipeline::new().parse("help", &Context::default()).unwrap_err();
        assert_eq!(err, ParseError::no_parser_matched("help"));
    }

    #[test]
    fn test_first_accepting_strategy_wins() {
        let (first, first_calls) = counting("first");
        let (second, second_calls) = counting("second");

        let pipeline = Pipeline::new()
            .with_strategy(first, always())
            .with_strategy(second, always());

        let result = pipeline.parse("anything", &Context::default()).unwrap();
        assert_eq!(result.mode(), "first");
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_activation_gates_strategy() {
        let (gated, gated_calls) = counting("gated");
        let (fallback, _) = counting("fallback");

        let pipeline = Pipeline::new()
            .with_strategy(gated, mode(ParseMode::shell()))
            .with_strategy(fallback, always());

        let mut ctx = Context::default();
        assert_eq!(pipeline.route("ls", &ctx), Some("fallback"));

        ctx.set_mode(ParseMode::shell());
        assert_eq!(pipeline.route("ls", &ctx), Some("gated"));
        assert_eq!(gated_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_routing_between_shell_and_text() {
        let pipeline = standard();
        let ctx = Context::default();

        let shell = pipeline.parse("!echo a; rm b", &ctx).unwrap();
        assert_eq!(shell.mode(), &ParseMode::shell());
        assert_eq!(shell.payload(), Some("echo a; rm b"));

        let text = pipeline.parse("build --release", &ctx).unwrap();
        assert_eq!(text.mode(), &ParseMode::text());
        assert!(text.has_flag("release"));
    }

    #[test]
    fn test_strategy_errors_pass_through_unchanged() {
        let pipeline = standard();
        let ctx = Context::default();

        let err = pipeline.parse("buidl", &ctx).unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::UnknownCommand);
        assert_eq!(err.suggestions().first().map(CommandId::as_str), Some("build"));

        let err = pipeline.parse("!", &ctx).unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::EmptyShellCommand);
    }

    #[test]
    fn test_no_implicit_fallback() {
        let (only, _) = counting("only");
        let pipeline = Pipeline::new().with_strategy(only, not(always()));
        let err = pipeline.parse("x", &Context::default()).unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::NoParserMatched);
        assert_eq!(err.raw_input(), "x");
    }

    #[test]
    fn test_parse_is_deterministic() {
        let pipeline = standard();
        let ctx = Context::default();
        for line in ["build --release", "!ls", "nope", r#"build "x"#] {
            assert_eq!(pipeline.parse(line, &ctx), pipeline.parse(line, &ctx));
        }
    }

    #[test]
    fn test_suggestions_are_merged_and_deduplicated() {
        let (a, _) = counting("a");
        let (b, _) = counting("b");
        let pipeline = Pipeline::new()
            .with_strategy(a, always())
            .with_strategy(b, always());

        let names: Vec<String> = pipeline
            .suggestions("", &Context::default())
            .into_iter()
            .map(CommandId::into_inner)
            .collect();
        assert_eq!(names, vec!["shared", "a", "b"]);
    }

    #[test]
    fn test_suggestions_respect_activation() {
        let pipeline = standard();
        let ctx = Context::default();

        let shell = pipeline.suggestions("!gr", &ctx);
        assert_eq!(shell, vec![CommandId::new("!grep")]);

        let text = pipeline.suggestions("bui", &ctx);
        assert_eq!(text.first().map(CommandId::as_str), Some("build"));
    }

    #[test]
    fn test_management() {
        let mut pipeline = standard();
        assert_eq!(pipeline.strategy_count(), 2);
        assert_eq!(pipeline.strategy_names(), vec!["shell", "text"]);

        assert!(pipeline.remove_strategy("shell"));
        assert!(!pipeline.remove_strategy("shell"));
        assert_eq!(pipeline.route("!ls", &Context::default()), Some("text"));

        pipeline.clear();
        assert_eq!(pipeline.strategy_count(), 0);
    }
}

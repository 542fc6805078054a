//! The free-form text command grammar.
//!
//! ```text
//! <command> [positional ...] [--option value | --option=value ...] [--flag ...] [-abc] [-- positional ...]
//! ```
//!
//! The head token is resolved through the [`CommandRegistry`]; everything
//! after it is classified against the resolved command's declared options
//! and flags. Quoted tokens are always values, so `echo "--not-an-option"`
//! passes the text through as a positional argument. A single-dash cluster
//! is read as flags only when every letter is a declared flag, so `grep -i`
//! works for commands that declare nothing.

use std::iter::Peekable;
use std::slice::Iter;
use std::sync::Arc;

use parley_core::{
    ArgumentValue, CommandId, CommandMetadata, Context, FlagName, OptionKey, ParseError, ParseMode,
    ParseResult, ParseResultBuilder, Token, tokenize,
};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::RegistryError;
use crate::registry::CommandRegistry;
use crate::strategy::ParserStrategy;

/// How the text grammar treats options a command does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionPolicy {
    /// Undeclared options fail with [`ParseError::UnrecognizedOption`].
    #[default]
    Reject,
    /// Undeclared options are kept: `--k v` and `--k=v` become options,
    /// `--k` followed by another option or nothing becomes a flag.
    Accept,
}

/// Parses `<command> [args...]` lines against a shared registry.
#[derive(Debug, Clone)]
pub struct TextStrategy {
    registry: Arc<CommandRegistry>,
    policy: OptionPolicy,
}

impl TextStrategy {
    /// Strategy name reported to the pipeline.
    pub const NAME: &'static str = "text";

    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self {
            registry,
            policy: OptionPolicy::default(),
        }
    }

    /// Sets the policy for undeclared options.
    pub fn with_policy(mut self, policy: OptionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> OptionPolicy {
        self.policy
    }

    pub fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    fn resolve(&self, head: &Token, line: &str) -> Result<CommandMetadata, ParseError> {
        // An empty quoted head would prefix-match every command.
        if head.text.is_empty() {
            return Err(ParseError::UnknownCommand {
                raw_input: line.to_string(),
                command: CommandId::new(""),
                suggestions: Vec::new(),
            });
        }

        match self.registry.resolve_metadata(&head.text) {
            Ok(meta) => Ok(meta),
            Err(RegistryError::UnknownCommand { name, suggestions }) => {
                Err(ParseError::UnknownCommand {
                    raw_input: line.to_string(),
                    command: name,
                    suggestions,
                })
            }
            Err(_) => Err(ParseError::UnknownCommand {
                raw_input: line.to_string(),
                command: CommandId::new(head.text.clone()),
                suggestions: Vec::new(),
            }),
        }
    }
}

impl ParserStrategy for TextStrategy {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn mode(&self) -> ParseMode {
        ParseMode::text()
    }

    fn can_parse(&self, line: &str, _context: &Context) -> bool {
        !line.trim().is_empty()
    }

    fn parse(&self, line: &str, _context: &Context) -> Result<ParseResult, ParseError> {
        let tokens = tokenize(line).map_err(|err| ParseError::from_tokenize(err, line))?;
        let Some((head, rest)) = tokens.split_first() else {
            return Err(ParseError::EmptyInput {
                raw_input: line.to_string(),
            });
        };

        let meta = self.resolve(head, line)?;
        trace!(command = %meta.id, typed = %head.text, "Resolved command");

        let mut parser = ArgumentParser {
            meta: &meta,
            policy: self.policy,
            line,
            builder: ParseResult::builder(meta.id.clone(), self.mode(), line),
        };
        parser.run(rest.iter().peekable())?;
        Ok(parser.builder.build())
    }

    fn suggestions(&self, partial: &str, _context: &Context) -> Vec<CommandId> {
        let head = partial.trim_start();
        if head.contains(char::is_whitespace) {
            return Vec::new();
        }
        self.registry.suggest(head, self.registry.suggestion_limit())
    }
}

/// Classifies the tokens after the command head.
struct ArgumentParser<'a> {
    meta: &'a CommandMetadata,
    policy: OptionPolicy,
    line: &'a str,
    builder: ParseResultBuilder,
}

impl ArgumentParser<'_> {
    fn run(&mut self, mut tokens: Peekable<Iter<'_, Token>>) -> Result<(), ParseError> {
        let mut options_ended = false;

        while let Some(token) = tokens.next() {
            if options_ended || token.quoted {
                self.positional(token);
                continue;
            }

            let text = token.text.as_str();
            if text == "--" {
                options_ended = true;
            } else if let Some(body) = text.strip_prefix("--") {
                self.long(body, &mut tokens)?;
            } else if is_short_cluster(text) && self.accepts_cluster(&text[1..]) {
                self.short(&text[1..]);
            } else {
                self.positional(token);
            }
        }

        Ok(())
    }

    fn positional(&mut self, token: &Token) {
        self.builder
            .push_argument(ArgumentValue::new(token.text.clone()));
    }

    fn long(&mut self, body: &str, tokens: &mut Peekable<Iter<'_, Token>>) -> Result<(), ParseError> {
        if let Some((key, value)) = body.split_once('=') {
            if self.meta.accepts_option(key) || self.accepts_undeclared() {
                self.builder
                    .insert_option(OptionKey::new(key), ArgumentValue::new(value));
                return Ok(());
            }
            if self.meta.accepts_flag(key) {
                return Err(ParseError::UnexpectedFlagValue {
                    raw_input: self.line.to_string(),
                    command: self.meta.id.clone(),
                    flag: FlagName::new(key),
                });
            }
            return Err(self.unrecognized(key));
        }

        if self.meta.accepts_flag(body) {
            self.builder.insert_flag(FlagName::new(body));
            return Ok(());
        }

        if self.meta.accepts_option(body) {
            return match tokens.next_if(|next| !next.is_bare_prefixed("--")) {
                Some(value) => {
                    self.builder
                        .insert_option(OptionKey::new(body), ArgumentValue::new(value.text.clone()));
                    Ok(())
                }
                None => Err(ParseError::MissingOptionValue {
                    raw_input: self.line.to_string(),
                    command: self.meta.id.clone(),
                    option: OptionKey::new(body),
                }),
            };
        }

        if !self.accepts_undeclared() {
            return Err(self.unrecognized(body));
        }

        match tokens.next_if(|next| !looks_like_option(next)) {
            Some(value) => self
                .builder
                .insert_option(OptionKey::new(body), ArgumentValue::new(value.text.clone())),
            None => self.builder.insert_flag(FlagName::new(body)),
        }
        Ok(())
    }

    /// A cluster is flags only if every letter is; otherwise it stays positional.
    fn accepts_cluster(&self, cluster: &str) -> bool {
        self.accepts_undeclared()
            || cluster
                .chars()
                .all(|ch| self.meta.accepts_flag(ch.encode_utf8(&mut [0; 4])))
    }

    fn short(&mut self, cluster: &str) {
        for ch in cluster.chars() {
            self.builder.insert_flag(FlagName::new(ch.to_string()));
        }
    }

    fn accepts_undeclared(&self) -> bool {
        self.policy == OptionPolicy::Accept
    }

    fn unrecognized(&self, key: &str) -> ParseError {
        ParseError::UnrecognizedOption {
            raw_input: self.line.to_string(),
            command: self.meta.id.clone(),
            option: OptionKey::new(key),
            declared: self.meta.declared_options.iter().cloned().collect(),
        }
    }
}

/// `-abc`, but not `-`, `--x`, or a negative number.
fn is_short_cluster(text: &str) -> bool {
    text.len() > 1 && text.starts_with('-') && !text.starts_with("--") && !is_negative_number(text)
}

fn is_negative_number(text: &str) -> bool {
    let Some(rest) = text.strip_prefix('-') else {
        return false;
    };
    rest.starts_with(|c: char| c.is_ascii_digit() || c == '.') && rest.parse::<f64>().is_ok()
}

fn looks_like_option(token: &Token) -> bool {
    !token.quoted
        && (token.text.starts_with("--") || is_short_cluster(&token.text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::ParseErrorKind;

    fn strategy() -> TextStrategy {
        let registry = CommandRegistry::new();
        registry
            .register(
                CommandMetadata::new("build")
                    .alias("b")
                    .option("target")
                    .option("jobs")
                    .flag("release")
                    .flag("v")
                    .flag("q"),
            )
            .unwrap();
        registry.register(CommandMetadata::new("bundle")).unwrap();
        registry
            .register(CommandMetadata::new("echo").flag("n"))
            .unwrap();
        registry.register(CommandMetadata::new("run")).unwrap();
        TextStrategy::new(Arc::new(registry))
    }

    fn parse(line: &str) -> Result<ParseResult, ParseError> {
        strategy().parse(line, &Context::default())
    }

    fn args(result: &ParseResult) -> Vec<&str> {
        result.arguments().iter().map(ArgumentValue::as_str).collect()
    }

    #[test]
    fn test_command_with_options_and_flags() {
        let result = parse("build src lib --target=wasm --jobs 4 --release -vq").unwrap();

        assert_eq!(result.command(), "build");
        assert_eq!(result.mode(), &ParseMode::text());
        assert_eq!(args(&result), vec!["src", "lib"]);
        assert_eq!(result.option("target").map(ArgumentValue::as_str), Some("wasm"));
        assert_eq!(result.option("jobs").map(ArgumentValue::as_str), Some("4"));
        assert!(result.has_flag("release"));
        assert!(result.has_flag("v"));
        assert!(result.has_flag("q"));
        assert_eq!(result.raw_input(), "build src lib --target=wasm --jobs 4 --release -vq");
    }

    #[test]
    fn test_alias_resolves_to_canonical_id() {
        let result = parse("b --release").unwrap();
        assert_eq!(result.command(), "build");
    }

    #[test]
    fn test_unknown_command_suggests() {
        let err = parse("buidl now").unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::UnknownCommand);
        assert_eq!(err.command().map(CommandId::as_str), Some("buidl"));
        assert_eq!(err.suggestions().first().map(CommandId::as_str), Some("build"));
    }

    #[test]
    fn test_unknown_command_without_close_match() {
        let err = parse("zzzzzzzz").unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::UnknownCommand);
        assert!(err.suggestions().is_empty());
    }

    #[test]
    fn test_empty_quoted_head_has_no_suggestions() {
        let err = parse(r#""" build"#).unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::UnknownCommand);
        assert!(err.suggestions().is_empty());
    }

    #[test]
    fn test_unterminated_quote() {
        let err = parse(r#"run "foo"#).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnterminatedQuote {
                raw_input: r#"run "foo"#.to_string(),
                quote: '"',
                position: 4,
            }
        );
    }

    #[test]
    fn test_blank_line_is_empty_input() {
        assert_eq!(parse("   ").unwrap_err().kind(), ParseErrorKind::EmptyInput);
        assert!(!strategy().can_parse("  ", &Context::default()));
    }

    #[test]
    fn test_undeclared_option_rejected_by_default() {
        let err = parse("build --colour").unwrap_err();
        match err {
            ParseError::UnrecognizedOption {
                command,
                option,
                declared,
                ..
            } => {
                assert_eq!(command, "build");
                assert_eq!(option, "colour");
                assert_eq!(declared, vec![OptionKey::new("jobs"), OptionKey::new("target")]);
            }
            other => panic!("unexpected error: {other:?}"),
        }

    }

    #[test]
    fn test_undeclared_short_cluster_is_positional() {
        let result = parse("build -vx").unwrap();
        assert_eq!(args(&result), vec!["-vx"]);
        assert!(!result.has_flag("v"));

        let result = parse("run -i foo").unwrap();
        assert_eq!(args(&result), vec!["-i", "foo"]);
        assert!(result.flags().is_empty());
    }

    #[test]
    fn test_accept_policy_keeps_undeclared_options() {
        let strategy = strategy().with_policy(OptionPolicy::Accept);
        let ctx = Context::default();

        let result = strategy
            .parse("run --env prod --dry --level=3 --fast", &ctx)
            .unwrap();
        assert_eq!(result.option("env").map(ArgumentValue::as_str), Some("prod"));
        assert_eq!(result.option("level").map(ArgumentValue::as_str), Some("3"));
        assert!(result.has_flag("dry"));
        assert!(result.has_flag("fast"));

        let result = strategy.parse("run -xy", &ctx).unwrap();
        assert!(result.has_flag("x") && result.has_flag("y"));
    }

    #[test]
    fn test_missing_option_value() {
        let err = parse("build --target").unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::MissingOptionValue);

        let err = parse("build --target --release").unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::MissingOptionValue);
    }

    #[test]
    fn test_option_value_may_start_with_single_dash() {
        let result = parse("build --jobs -1").unwrap();
        assert_eq!(result.option("jobs").map(ArgumentValue::as_str), Some("-1"));
    }

    #[test]
    fn test_flag_with_value_is_rejected() {
        let err = parse("build --release=yes").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedFlagValue { ref flag, .. } if flag == "release"));
    }

    #[test]
    fn test_double_dash_ends_options() {
        let result = parse("echo -n -- --release -v").unwrap();
        assert!(result.has_flag("n"));
        assert_eq!(args(&result), vec!["--release", "-v"]);
    }

    #[test]
    fn test_quoted_tokens_are_positional() {
        let result = parse(r#"echo "--release" '-n' "hello world""#).unwrap();
        assert!(result.flags().is_empty());
        assert_eq!(args(&result), vec!["--release", "-n", "hello world"]);
    }

    #[test]
    fn test_negative_numbers_and_bare_dash_are_positional() {
        let result = parse("echo -5 -1.5 -").unwrap();
        assert_eq!(args(&result), vec!["-5", "-1.5", "-"]);
        assert!(result.flags().is_empty());
    }

    #[test]
    fn test_quoted_option_value_keeps_spaces() {
        let result = parse(r#"build --target "my target""#).unwrap();
        assert_eq!(result.option("target").map(ArgumentValue::as_str), Some("my target"));
    }

    #[test]
    fn test_suggestions_only_for_the_head() {
        let strategy = strategy();
        let ctx = Context::default();

        let suggestions = strategy.suggestions("  bu", &ctx);
        assert_eq!(
            &suggestions[..2],
            &[CommandId::new("build"), CommandId::new("bundle")]
        );
        assert!(strategy.suggestions("build --t", &ctx).is_empty());
    }

    #[test]
    fn test_parse_is_deterministic() {
        let strategy = strategy();
        let ctx = Context::default();
        let line = "b x --jobs 2 -v";
        assert_eq!(strategy.parse(line, &ctx), strategy.parse(line, &ctx));
    }
}

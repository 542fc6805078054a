//! Error types shared by every Parley crate.
//!
//! Registry-level errors live in `parley-framework`; everything a strategy
//! can return from `parse` is a [`ParseError`].

use std::fmt;

use thiserror::Error;

use crate::ident::{CommandId, FlagName, OptionKey};

/// Returned by the validating identifier constructors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// The text was empty or whitespace-only.
    #[error("{kind} cannot be empty")]
    Empty {
        /// Which identifier type rejected the text.
        kind: &'static str,
    },

    /// The text exceeded the length limit.
    #[error("{kind} is too long ({len} characters, max {max})")]
    TooLong {
        /// Which identifier type rejected the text.
        kind: &'static str,
        /// Length of the rejected text in characters.
        len: usize,
        /// Maximum accepted length.
        max: usize,
    },
}

/// Errors produced by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    /// A quote was opened and never closed.
    ///
    /// Interactive callers usually answer this by asking for a continuation
    /// line instead of rejecting the input.
    #[error("unterminated quote {quote:?} opened at byte {position}")]
    UnterminatedQuote {
        /// The quote character that was left open.
        quote: char,
        /// Byte offset of the opening quote in the input.
        position: usize,
    },
}

/// Discriminant of a [`ParseError`], convenient for `match` and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// See [`ParseError::UnterminatedQuote`].
    UnterminatedQuote,
    /// See [`ParseError::UnknownCommand`].
    UnknownCommand,
    /// See [`ParseError::UnrecognizedOption`].
    UnrecognizedOption,
    /// See [`ParseError::MissingOptionValue`].
    MissingOptionValue,
    /// See [`ParseError::UnexpectedFlagValue`].
    UnexpectedFlagValue,
    /// See [`ParseError::NoParserMatched`].
    NoParserMatched,
    /// See [`ParseError::EmptyInput`].
    EmptyInput,
    /// See [`ParseError::EmptyShellCommand`].
    EmptyShellCommand,
}

impl ParseErrorKind {
    /// Stable, machine-friendly name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UnterminatedQuote => "unterminated_quote",
            Self::UnknownCommand => "unknown_command",
            Self::UnrecognizedOption => "unrecognized_option",
            Self::MissingOptionValue => "missing_option_value",
            Self::UnexpectedFlagValue => "unexpected_flag_value",
            Self::NoParserMatched => "no_parser_matched",
            Self::EmptyInput => "empty_input",
            Self::EmptyShellCommand => "empty_shell_command",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed parse.
///
/// Every variant carries the original `raw_input`. Strategy errors travel
/// through the pipeline unchanged, so callers can branch on the exact kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The tokenizer found a quote that was never closed.
    #[error("unterminated quote {quote:?} opened at byte {position}")]
    UnterminatedQuote {
        /// The original input line.
        raw_input: String,
        /// The quote character left open.
        quote: char,
        /// Byte offset of the opening quote.
        position: usize,
    },

    /// The head token did not resolve to a registered command or alias.
    #[error("unknown command '{command}'")]
    UnknownCommand {
        /// The original input line.
        raw_input: String,
        /// The head token as typed.
        command: CommandId,
        /// Ranked suggestions, best first. May be empty.
        suggestions: Vec<CommandId>,
    },

    /// An option token was not declared by the resolved command.
    #[error("unrecognized option '{option}' for command '{command}'")]
    UnrecognizedOption {
        /// The original input line.
        raw_input: String,
        /// The resolved command.
        command: CommandId,
        /// The offending key, without dashes.
        option: OptionKey,
        /// Options the command does declare.
        declared: Vec<OptionKey>,
    },

    /// A declared option was given without a value.
    #[error("missing value for option '{option}' of command '{command}'")]
    MissingOptionValue {
        /// The original input line.
        raw_input: String,
        /// The resolved command.
        command: CommandId,
        /// The option missing its value.
        option: OptionKey,
    },

    /// A declared flag was given an `=value`.
    #[error("flag '{flag}' of command '{command}' does not take a value")]
    UnexpectedFlagValue {
        /// The original input line.
        raw_input: String,
        /// The resolved command.
        command: CommandId,
        /// The flag that received a value.
        flag: FlagName,
    },

    /// No strategy in the pipeline activated for the input.
    #[error("no parser accepted the input")]
    NoParserMatched {
        /// The original input line.
        raw_input: String,
    },

    /// The input contained no tokens.
    #[error("empty input")]
    EmptyInput {
        /// The original input line.
        raw_input: String,
    },

    /// The shell prefix was not followed by a command.
    #[error("shell prefix '{prefix}' is not followed by a command")]
    EmptyShellCommand {
        /// The original input line.
        raw_input: String,
        /// The configured shell prefix.
        prefix: char,
    },
}

impl ParseError {
    /// Converts a tokenizer failure on `raw_input` into a parse error.
    pub fn from_tokenize(error: TokenizeError, raw_input: impl Into<String>) -> Self {
        match error {
            TokenizeError::UnterminatedQuote { quote, position } => Self::UnterminatedQuote {
                raw_input: raw_input.into(),
                quote,
                position,
            },
        }
    }

    /// Creates a [`ParseError::NoParserMatched`].
    pub fn no_parser_matched(raw_input: impl Into<String>) -> Self {
        Self::NoParserMatched {
            raw_input: raw_input.into(),
        }
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ParseErrorKind {
        match self {
            Self::UnterminatedQuote { .. } => ParseErrorKind::UnterminatedQuote,
            Self::UnknownCommand { .. } => ParseErrorKind::UnknownCommand,
            Self::UnrecognizedOption { .. } => ParseErrorKind::UnrecognizedOption,
            Self::MissingOptionValue { .. } => ParseErrorKind::MissingOptionValue,
            Self::UnexpectedFlagValue { .. } => ParseErrorKind::UnexpectedFlagValue,
            Self::NoParserMatched { .. } => ParseErrorKind::NoParserMatched,
            Self::EmptyInput { .. } => ParseErrorKind::EmptyInput,
            Self::EmptyShellCommand { .. } => ParseErrorKind::EmptyShellCommand,
        }
    }

    /// Returns the original input line.
    pub fn raw_input(&self) -> &str {
        match self {
            Self::UnterminatedQuote { raw_input, .. }
            | Self::UnknownCommand { raw_input, .. }
            | Self::UnrecognizedOption { raw_input, .. }
            | Self::MissingOptionValue { raw_input, .. }
            | Self::UnexpectedFlagValue { raw_input, .. }
            | Self::NoParserMatched { raw_input }
            | Self::EmptyInput { raw_input }
            | Self::EmptyShellCommand { raw_input, .. } => raw_input,
        }
    }

    /// Returns the command the input referred to, if one was identified.
    pub fn command(&self) -> Option<&CommandId> {
        match self {
            Self::UnknownCommand { command, .. }
            | Self::UnrecognizedOption { command, .. }
            | Self::MissingOptionValue { command, .. }
            | Self::UnexpectedFlagValue { command, .. } => Some(command),
            Self::UnterminatedQuote { .. }
            | Self::NoParserMatched { .. }
            | Self::EmptyInput { .. }
            | Self::EmptyShellCommand { .. } => None,
        }
    }

    /// Returns ranked command suggestions, best first.
    pub fn suggestions(&self) -> &[CommandId] {
        match self {
            Self::UnknownCommand { suggestions, .. } => suggestions,
            _ => &[],
        }
    }

    /// Returns `true` if more input could turn this into a successful parse.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, Self::UnterminatedQuote { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tokenize_keeps_position() {
        let err = ParseError::from_tokenize(
            TokenizeError::UnterminatedQuote {
                quote: '"',
                position: 4,
            },
            "run \"foo",
        );

        assert_eq!(err.kind(), ParseErrorKind::UnterminatedQuote);
        assert_eq!(err.raw_input(), "run \"foo");
        assert!(err.is_incomplete());
        assert!(err.command().is_none());
    }

    #[test]
    fn test_unknown_command_exposes_suggestions() {
        let err = ParseError::UnknownCommand {
            raw_input: "buidl".into(),
            command: CommandId::new("buidl"),
            suggestions: vec![CommandId::new("build")],
        };

        assert_eq!(err.suggestions(), &[CommandId::new("build")]);
        assert_eq!(err.command().map(CommandId::as_str), Some("buidl"));
        assert_eq!(err.to_string(), "unknown command 'buidl'");
    }

    #[test]
    fn test_other_kinds_have_no_suggestions() {
        let err = ParseError::no_parser_matched("???");
        assert!(err.suggestions().is_empty());
        assert_eq!(err.kind().as_str(), "no_parser_matched");
    }
}

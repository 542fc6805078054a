//! Shell pass-through.
//!
//! Lines starting with the shell prefix (`!` by default) are not tokenized.
//! Everything after the prefix is handed to the command-execution
//! collaborator as one opaque payload, so `!echo a; rm b` yields the payload
//! `echo a; rm b` untouched.

use parley_core::{CommandId, Context, ParseError, ParseMode, ParseResult};

use crate::strategy::ParserStrategy;

/// Default shell prefix.
pub const DEFAULT_SHELL_PREFIX: char = '!';

/// Commands offered as completions after the prefix.
pub const DEFAULT_SHELL_COMMANDS: &[&str] = &[
    "ls", "pwd", "ps", "grep", "find", "cat", "less", "head", "tail",
];

/// Wraps prefixed lines as opaque shell payloads.
#[derive(Debug, Clone)]
pub struct ShellStrategy {
    prefix: char,
    completions: Vec<String>,
}

impl Default for ShellStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellStrategy {
    /// Strategy name reported to the pipeline.
    pub const NAME: &'static str = "shell";

    pub fn new() -> Self {
        Self {
            prefix: DEFAULT_SHELL_PREFIX,
            completions: DEFAULT_SHELL_COMMANDS
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }

    /// Sets the prefix character.
    pub fn with_prefix(mut self, prefix: char) -> Self {
        self.prefix = prefix;
        self
    }

    /// Replaces the completion list.
    pub fn with_completions<I, S>(mut self, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.completions = commands.into_iter().map(Into::into).collect();
        self
    }

    pub fn prefix(&self) -> char {
        self.prefix
    }

    /// Returns the payload of `line`, or `None` if it lacks the prefix.
    ///
    /// Whitespace between the prefix and the command and trailing line
    /// terminators are dropped. Everything else is kept verbatim.
    pub fn payload<'a>(&self, line: &'a str) -> Option<&'a str> {
        line.trim_start()
            .strip_prefix(self.prefix)
            .map(|rest| rest.trim_start().trim_end_matches(['\r', '\n']))
    }
}

impl ParserStrategy for ShellStrategy {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn mode(&self) -> ParseMode {
        ParseMode::shell()
    }

    fn can_parse(&self, line: &str, _context: &Context) -> bool {
        line.trim_start().starts_with(self.prefix)
    }

    fn parse(&self, line: &str, _context: &Context) -> Result<ParseResult, ParseError> {
        let payload = self
            .payload(line)
            .ok_or_else(|| ParseError::no_parser_matched(line))?;

        if payload.is_empty() {
            return Err(ParseError::EmptyShellCommand {
                raw_input: line.to_string(),
                prefix: self.prefix,
            });
        }

        Ok(ParseResult::pass_through(self.mode(), payload, line))
    }

    fn suggestions(&self, partial: &str, _context: &Context) -> Vec<CommandId> {
        let Some(typed) = self.payload(partial) else {
            return Vec::new();
        };
        if typed.contains(char::is_whitespace) {
            return Vec::new();
        }

        self.completions
            .iter()
            .filter(|c| c.starts_with(typed))
            .map(|c| CommandId::new(format!("{}{}", self.prefix, c)))
            .collect()
    }
}

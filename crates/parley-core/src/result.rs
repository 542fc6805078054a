//! Parse results and the raw/semantic boundary.
//!
//! [`ParseResult`] is the branded value strategies hand back to callers.
//! [`RawParseResult`] is the same data as plain strings, for logs and for
//! crossing serialization boundaries. Conversion is total and lossless in
//! both directions; no validation happens on the way back in.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::ident::{ArgumentValue, CommandId, FlagName, OptionKey, ParseMode};

/// A successfully parsed input line.
///
/// Immutable once built. The `command` is empty only for pass-through
/// results, which carry their opaque payload as the single argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    command: CommandId,
    arguments: Vec<ArgumentValue>,
    options: BTreeMap<OptionKey, ArgumentValue>,
    flags: BTreeSet<FlagName>,
    mode: ParseMode,
    raw_input: String,
}

/// The branded form of a parse result, as produced by [`to_semantic`].
pub type SemanticParseResult = ParseResult;

impl ParseResult {
    /// Starts building a command result.
    pub fn builder(
        command: CommandId,
        mode: ParseMode,
        raw_input: impl Into<String>,
    ) -> ParseResultBuilder {
        ParseResultBuilder {
            inner: ParseResult {
                command,
                arguments: Vec::new(),
                options: BTreeMap::new(),
                flags: BTreeSet::new(),
                mode,
                raw_input: raw_input.into(),
            },
        }
    }

    /// Creates a pass-through result carrying `payload` verbatim.
    pub fn pass_through(
        mode: ParseMode,
        payload: impl Into<String>,
        raw_input: impl Into<String>,
    ) -> Self {
        Self {
            command: CommandId::default(),
            arguments: vec![ArgumentValue::new(payload)],
            options: BTreeMap::new(),
            flags: BTreeSet::new(),
            mode,
            raw_input: raw_input.into(),
        }
    }

    pub fn command(&self) -> &CommandId {
        &self.command
    }

    pub fn arguments(&self) -> &[ArgumentValue] {
        &self.arguments
    }

    pub fn options(&self) -> &BTreeMap<OptionKey, ArgumentValue> {
        &self.options
    }

    pub fn flags(&self) -> &BTreeSet<FlagName> {
        &self.flags
    }

    pub fn mode(&self) -> &ParseMode {
        &self.mode
    }

    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    /// Returns the positional argument at `index`.
    pub fn argument(&self, index: usize) -> Option<&ArgumentValue> {
        self.arguments.get(index)
    }

    /// Returns the value of option `key`.
    pub fn option(&self, key: &str) -> Option<&ArgumentValue> {
        self.options.get(key)
    }

    /// Returns `true` if flag `name` was given.
    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.contains(name)
    }

    /// Returns `true` for payload results that carry no command.
    pub fn is_pass_through(&self) -> bool {
        self.command.is_empty()
    }

    /// Returns the opaque payload of a pass-through result.
    pub fn payload(&self) -> Option<&str> {
        if self.is_pass_through() {
            self.arguments.first().map(ArgumentValue::as_str)
        } else {
            None
        }
    }
}

/// Builder returned by [`ParseResult::builder`].
#[derive(Debug, Clone)]
pub struct ParseResultBuilder {
    inner: ParseResult,
}

impl ParseResultBuilder {
    /// Appends a positional argument.
    pub fn argument(mut self, value: impl Into<String>) -> Self {
        self.inner.arguments.push(ArgumentValue::new(value));
        self
    }

    /// Sets an option. A repeated key keeps the last value.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.inner
            .options
            .insert(OptionKey::new(key), ArgumentValue::new(value));
        self
    }

    /// Sets a flag.
    pub fn flag(mut self, name: impl Into<String>) -> Self {
        self.inner.flags.insert(FlagName::new(name));
        self
    }

    pub fn push_argument(&mut self, value: ArgumentValue) {
        self.inner.arguments.push(value);
    }

    pub fn insert_option(&mut self, key: OptionKey, value: ArgumentValue) {
        self.inner.options.insert(key, value);
    }

    pub fn insert_flag(&mut self, name: FlagName) {
        self.inner.flags.insert(name);
    }

    pub fn build(self) -> ParseResult {
        self.inner
    }
}

/// Plain-string form of a [`ParseResult`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawParseResult {
    pub command: String,
    #[serde(default)]
    pub arguments: Vec<String>,
    #[serde(default)]
    pub options: BTreeMap<String, String>,
    #[serde(default)]
    pub flags: BTreeSet<String>,
    pub mode: String,
    pub raw_input: String,
}

/// Strips the branding from a result.
pub fn to_raw(result: &ParseResult) -> RawParseResult {
    RawParseResult {
        command: result.command.as_str().to_string(),
        arguments: result
            .arguments
            .iter()
            .map(|a| a.as_str().to_string())
            .collect(),
        options: result
            .options
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.as_str().to_string()))
            .collect(),
        flags: result.flags.iter().map(|f| f.as_str().to_string()).collect(),
        mode: result.mode.as_str().to_string(),
        raw_input: result.raw_input.clone(),
    }
}

/// Brands a raw result without validating it.
pub fn to_semantic(raw: RawParseResult) -> SemanticParseResult {
    ParseResult {
        command: CommandId::new(raw.command),
        arguments: raw.arguments.into_iter().map(ArgumentValue::new).collect(),
        options: raw
            .options
            .into_iter()
            .map(|(k, v)| (OptionKey::new(k), ArgumentValue::new(v)))
            .collect(),
        flags: raw.flags.into_iter().map(FlagName::new).collect(),
        mode: ParseMode::new(raw.mode),
        raw_input: raw.raw_input,
    }
}

impl From<&ParseResult> for RawParseResult {
    fn from(result: &ParseResult) -> Self {
        to_raw(result)
    }
}

impl From<RawParseResult> for ParseResult {
    fn from(raw: RawParseResult) -> Self {
        to_semantic(raw)
    }
}

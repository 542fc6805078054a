//! Session context read by parser strategies.
//!
//! The [`Context`] is owned by whoever drives the session (the execution
//! engine). Strategies only borrow it for the duration of a `can_parse`,
//! `parse`, or `suggestions` call and never keep references to it.
//!
//! History is append-only: nothing in the parser reorders or truncates it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ident::{ContextKey, ParseMode};

/// Mutable session state shared between the execution engine and parsers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    current_mode: ParseMode,
    history: Vec<String>,
    #[serde(default)]
    variables: HashMap<ContextKey, Value>,
    #[serde(default)]
    current_directory: Option<PathBuf>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new(ParseMode::text())
    }
}

impl Context {
    /// Creates an empty context in the given mode.
    pub fn new(mode: ParseMode) -> Self {
        Self {
            current_mode: mode,
            history: Vec::new(),
            variables: HashMap::new(),
            current_directory: None,
        }
    }

    /// Returns the current parse mode.
    pub fn mode(&self) -> &ParseMode {
        &self.current_mode
    }

    /// Switches the current parse mode.
    pub fn set_mode(&mut self, mode: ParseMode) {
        self.current_mode = mode;
    }

    /// Returns `true` if the context is currently in `mode`.
    pub fn is_mode(&self, mode: &str) -> bool {
        self.current_mode == mode
    }

    /// Returns every recorded input line, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Appends a raw input line to the history.
    pub fn push_history(&mut self, line: impl Into<String>) {
        self.history.push(line.into());
    }

    /// Returns at most the `count` most recent lines, oldest first.
    pub fn recent_history(&self, count: usize) -> &[String] {
        let start = self.history.len().saturating_sub(count);
        &self.history[start..]
    }

    /// Looks up a session variable.
    pub fn variable(&self, key: &str) -> Option<&Value> {
        self.variables.get(key)
    }

    /// Returns `true` if the variable is set.
    pub fn has_variable(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }

    /// Sets a session variable, returning the previous value.
    pub fn set_variable(&mut self, key: ContextKey, value: impl Into<Value>) -> Option<Value> {
        self.variables.insert(key, value.into())
    }

    /// Removes a session variable, returning its value.
    pub fn remove_variable(&mut self, key: &str) -> Option<Value> {
        self.variables.remove(key)
    }

    /// Returns all session variables.
    pub fn variables(&self) -> &HashMap<ContextKey, Value> {
        &self.variables
    }

    /// Returns the logical working directory, if one was set.
    pub fn current_directory(&self) -> Option<&Path> {
        self.current_directory.as_deref()
    }

    /// Sets the logical working directory.
    pub fn set_current_directory(&mut self, dir: impl Into<PathBuf>) {
        self.current_directory = Some(dir.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_mode_is_text() {
        let ctx = Context::default();
        assert!(ctx.is_mode(ParseMode::TEXT));
        assert!(ctx.history().is_empty());
    }

    #[test]
    fn test_history_is_append_only() {
        let mut ctx = Context::default();
        ctx.push_history("first");
        ctx.push_history("second");
        ctx.push_history("third");

        assert_eq!(ctx.history(), &["first", "second", "third"]);
        assert_eq!(ctx.recent_history(2), &["second", "third"]);
        assert_eq!(ctx.recent_history(10).len(), 3);
        assert!(ctx.recent_history(0).is_empty());
    }

    #[test]
    fn test_variables() {
        let mut ctx = Context::default();
        assert!(ctx.set_variable(ContextKey::new("user"), "ada").is_none());
        assert_eq!(ctx.variable("user"), Some(&json!("ada")));

        let previous = ctx.set_variable(ContextKey::new("user"), json!({"name": "grace"}));
        assert_eq!(previous, Some(json!("ada")));

        assert_eq!(ctx.remove_variable("user"), Some(json!({"name": "grace"})));
        assert!(!ctx.has_variable("user"));
    }

    #[test]
    fn test_mode_switch() {
        let mut ctx = Context::default();
        ctx.set_mode(ParseMode::shell());
        assert_eq!(ctx.mode(), &ParseMode::shell());
    }

    #[test]
    fn test_serde_round_trip() {
        let mut ctx = Context::new(ParseMode::semantic());
        ctx.push_history("help");
        ctx.set_variable(ContextKey::new("depth"), 3);
        ctx.set_current_directory("/tmp");

        let json = serde_json::to_string(&ctx).unwrap();
        let back: Context = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ctx);
    }
}

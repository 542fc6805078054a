//! Configuration schema definitions.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use parley_core::{CommandMetadata, DEFAULT_CATEGORY, ParameterSpec};
use parley_framework::fuzzy::DEFAULT_MAX_DISTANCE;
use parley_framework::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_SHELL_PREFIX, DEFAULT_SUGGESTION_LIMIT, OptionPolicy,
};
use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParleyConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Parser settings.
    #[serde(default)]
    pub parser: ParserConfig,

    /// Commands registered at startup.
    #[serde(default)]
    pub commands: Vec<CommandConfig>,
}

// =============================================================================
// Logging
// =============================================================================

/// Log verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log line layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Full,
    Pretty,
    #[cfg(feature = "json-log")]
    Json,
}

/// Where log lines go.
///
/// Defaults to stderr so logs never interleave with command output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    Stdout,
    #[default]
    Stderr,
    File,
}

/// How often file output starts a new file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    #[default]
    Never,
    Hourly,
    Daily,
}

/// Which span lifecycle events are logged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanEventConfig {
    #[serde(default)]
    pub new: bool,
    #[serde(default)]
    pub enter: bool,
    #[serde(default)]
    pub exit: bool,
    #[serde(default)]
    pub close: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Base level; `RUST_LOG` takes precedence when set.
    #[serde(default)]
    pub level: LogLevel,

    #[serde(default)]
    pub format: LogFormat,

    #[serde(default)]
    pub output: LogOutput,

    /// Log file, required when `output` is `file`.
    #[serde(default)]
    pub file_path: Option<PathBuf>,

    #[serde(default)]
    pub rotation: LogRotation,

    #[serde(default)]
    pub span_events: SpanEventConfig,

    /// Include thread ids in log lines.
    #[serde(default)]
    pub thread_ids: bool,

    /// Include source file and line in log lines.
    #[serde(default)]
    pub file_location: bool,

    /// Per-target level overrides, e.g. `parley_framework = "trace"`.
    #[serde(default)]
    pub filters: HashMap<String, LogLevel>,
}

// =============================================================================
// Parser
// =============================================================================

/// Parser and registry settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Prefix that routes a line to the shell strategy.
    #[serde(default = "default_shell_prefix")]
    pub shell_prefix: char,

    /// Whether the shell strategy is installed at all.
    #[serde(default = "default_true")]
    pub shell_enabled: bool,

    /// Commands offered after the shell prefix. Empty means the built-in list.
    #[serde(default)]
    pub shell_completions: Vec<String>,

    /// How undeclared options are treated.
    #[serde(default)]
    pub option_policy: OptionPolicy,

    /// Suggestions attached to unknown-command errors.
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,

    /// Edit-distance cap for fuzzy suggestions.
    #[serde(default = "default_max_edit_distance")]
    pub max_edit_distance: usize,

    /// Memoized suggestion lists. Zero disables the memo.
    #[serde(default = "default_suggestion_cache_size")]
    pub suggestion_cache_size: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            shell_prefix: default_shell_prefix(),
            shell_enabled: true,
            shell_completions: Vec::new(),
            option_policy: OptionPolicy::default(),
            suggestion_limit: default_suggestion_limit(),
            max_edit_distance: default_max_edit_distance(),
            suggestion_cache_size: default_suggestion_cache_size(),
        }
    }
}

fn default_shell_prefix() -> char {
    DEFAULT_SHELL_PREFIX
}

fn default_true() -> bool {
    true
}

fn default_suggestion_limit() -> usize {
    DEFAULT_SUGGESTION_LIMIT
}

fn default_max_edit_distance() -> usize {
    DEFAULT_MAX_DISTANCE
}

fn default_suggestion_cache_size() -> usize {
    DEFAULT_CACHE_CAPACITY
}

// =============================================================================
// Commands
// =============================================================================

/// A command declared in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandConfig {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub aliases: Vec<String>,

    #[serde(default = "default_category")]
    pub category: String,

    #[serde(default)]
    pub hidden: bool,

    #[serde(default)]
    pub parameters: Vec<ParameterSpec>,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl CommandConfig {
    /// Creates a command entry with defaults.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            aliases: Vec::new(),
            category: default_category(),
            hidden: false,
            parameters: Vec::new(),
        }
    }

    /// Converts into registry metadata.
    pub fn to_metadata(&self) -> CommandMetadata {
        let meta = self.aliases.iter().fold(
            CommandMetadata::new(self.name.clone())
                .description(self.description.clone())
                .category(self.category.clone())
                .hidden(self.hidden),
            |meta, alias| meta.alias(alias.clone()),
        );

        self.parameters
            .iter()
            .cloned()
            .fold(meta, CommandMetadata::declare)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ParleyConfig::default();
        assert_eq!(config.parser.shell_prefix, '!');
        assert!(config.parser.shell_enabled);
        assert_eq!(config.parser.option_policy, OptionPolicy::Reject);
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.logging.output, LogOutput::Stderr);
        assert!(config.commands.is_empty());
    }

    #[test]
    fn test_command_to_metadata() {
        let command = CommandConfig {
            aliases: vec!["b".into()],
            parameters: vec![ParameterSpec::flag("release"), ParameterSpec::option("target")],
            ..CommandConfig::new("build")
        };

        let meta = command.to_metadata();
        assert_eq!(meta.id, "build");
        assert!(meta.aliases.contains("b"));
        assert!(meta.accepts_flag("release"));
        assert!(meta.accepts_option("target"));
        assert_eq!(meta.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn test_log_level_maps_to_tracing() {
        assert_eq!(LogLevel::Debug.to_tracing_level(), tracing::Level::DEBUG);
        assert_eq!(LogLevel::Warn.to_string(), "warn");
    }
}

//! Interactive session glue.
//!
//! A [`Session`] ties a [`Context`], a shared [`CommandRegistry`] and a
//! [`Pipeline`] together and turns each submitted line into a
//! [`Submission`] a front end can act on.

use std::sync::Arc;

use parley_core::{CommandId, CommandMetadata, Context, ParseError, ParseResult};
use parley_framework::{
    CommandRegistry, Pipeline, RegistryResult, ShellStrategy, TextStrategy, activation,
};
use tracing::{debug, info};

use crate::config::{ParleyConfig, ParserConfig};
use crate::error::RuntimeResult;

/// What a submitted line amounts to.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Blank line, nothing to do.
    Noop,
    /// A parsed command invocation.
    Command(ParseResult),
    /// A shell payload to hand to the execution collaborator.
    Shell(String),
    /// The line could not be parsed.
    Failed(ParseError),
}

impl Submission {
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::Noop)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl From<Result<ParseResult, ParseError>> for Submission {
    fn from(result: Result<ParseResult, ParseError>) -> Self {
        match result {
            Ok(parsed) => match parsed.payload() {
                Some(payload) if parsed.is_pass_through() => Self::Shell(payload.to_string()),
                _ => Self::Command(parsed),
            },
            Err(error) => Self::Failed(error),
        }
    }
}

/// A parsing session.
#[derive(Debug)]
pub struct Session {
    context: Context,
    registry: Arc<CommandRegistry>,
    pipeline: Pipeline,
}

impl Session {
    /// Creates a session with an empty registry.
    ///
    /// The shell strategy comes first, gated on its prefix, when enabled.
    /// The text strategy is last and accepts everything else.
    pub fn new(parser: &ParserConfig) -> Self {
        let registry = Arc::new(
            CommandRegistry::new()
                .with_max_distance(parser.max_edit_distance)
                .with_suggestion_limit(parser.suggestion_limit)
                .with_cache_capacity(parser.suggestion_cache_size),
        );

        let mut pipeline = Pipeline::new();
        if parser.shell_enabled {
            let mut shell = ShellStrategy::new().with_prefix(parser.shell_prefix);
            if !parser.shell_completions.is_empty() {
                shell = shell.with_completions(parser.shell_completions.iter().cloned());
            }
            pipeline.add_strategy(Arc::new(shell), activation::prefix(parser.shell_prefix));
        }
        pipeline.add_strategy(
            Arc::new(TextStrategy::new(registry.clone()).with_policy(parser.option_policy)),
            activation::always(),
        );

        Self {
            context: Context::default(),
            registry,
            pipeline,
        }
    }

    /// Creates a session and registers every configured command.
    pub fn from_config(config: &ParleyConfig) -> RuntimeResult<Self> {
        let session = Self::new(&config.parser);
        for command in &config.commands {
            session.registry.register(command.to_metadata())?;
        }
        info!(
            commands = session.registry.len(),
            strategies = session.pipeline.strategy_count(),
            "Session ready"
        );
        Ok(session)
    }

    /// Registers a command with the session's registry.
    pub fn register(&self, metadata: CommandMetadata) -> RegistryResult<()> {
        self.registry.register(metadata)
    }

    /// Parses one line.
    ///
    /// Non-blank lines are appended to history before parsing, including
    /// lines that fail.
    pub fn submit(&mut self, line: &str) -> Submission {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Submission::Noop;
        }

        self.context.push_history(line);
        let submission = Submission::from(self.pipeline.parse(line, &self.context));
        debug!(
            outcome = match &submission {
                Submission::Noop => "noop",
                Submission::Command(_) => "command",
                Submission::Shell(_) => "shell",
                Submission::Failed(_) => "failed",
            },
            "Submitted line"
        );
        submission
    }

    /// Completion candidates for a partial line.
    pub fn complete(&self, partial: &str) -> Vec<CommandId> {
        self.pipeline.suggestions(partial, &self.context)
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    pub fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&ParserConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use parley_core::{ParameterSpec, ParseErrorKind, ParseMode};
    use parley_framework::{OptionPolicy, RegistryError};

    use super::*;
    use crate::config::CommandConfig;
    use crate::error::RuntimeError;

    fn config() -> ParleyConfig {
        ParleyConfig {
            commands: vec![
                CommandConfig {
                    aliases: vec!["b".into()],
                    parameters: vec![
                        ParameterSpec::flag("release"),
                        ParameterSpec::option("target"),
                    ],
                    ..CommandConfig::new("build")
                },
                CommandConfig::new("deploy"),
            ],
            ..ParleyConfig::default()
        }
    }

    #[test]
    fn test_pipeline_order() {
        let session = Session::default();
        assert_eq!(
            session.pipeline().strategy_names(),
            vec![ShellStrategy::NAME, TextStrategy::NAME]
        );

        let parser = ParserConfig {
            shell_enabled: false,
            ..ParserConfig::default()
        };
        let session = Session::new(&parser);
        assert_eq!(session.pipeline().strategy_names(), vec![TextStrategy::NAME]);
    }

    #[test]
    fn test_submit_command() {
        let mut session = Session::from_config(&config()).unwrap();

        match session.submit("b --release --target=x86 main.rs\n") {
            Submission::Command(parsed) => {
                assert_eq!(parsed.command(), "build");
                assert!(parsed.has_flag("release"));
                assert_eq!(parsed.option("target").unwrap(), "x86");
                assert_eq!(parsed.argument(0).unwrap(), "main.rs");
                assert_eq!(parsed.mode(), &ParseMode::text());
            }
            other => panic!("unexpected submission: {other:?}"),
        }
        assert_eq!(session.context().history(), ["b --release --target=x86 main.rs"]);
    }

    #[test]
    fn test_submit_shell() {
        let mut session = Session::default();
        assert_eq!(
            session.submit("!echo a; rm b"),
            Submission::Shell("echo a; rm b".to_string())
        );
    }

    #[test]
    fn test_custom_shell_prefix() {
        let parser = ParserConfig {
            shell_prefix: '$',
            ..ParserConfig::default()
        };
        let mut session = Session::new(&parser);
        assert_eq!(session.submit("$ls -la"), Submission::Shell("ls -la".to_string()));
        assert!(session.submit("!ls").is_failed());
    }

    #[test]
    fn test_blank_lines_are_noops() {
        let mut session = Session::default();
        assert!(session.submit("").is_noop());
        assert!(session.submit("   \n").is_noop());
        assert!(session.context().history().is_empty());
    }

    #[test]
    fn test_failures_are_recorded() {
        let mut session = Session::from_config(&config()).unwrap();

        match session.submit("biuld") {
            Submission::Failed(error) => {
                assert_eq!(error.kind(), ParseErrorKind::UnknownCommand);
                assert!(error.suggestions().iter().any(|s| s == "build"));
            }
            other => panic!("unexpected submission: {other:?}"),
        }
        assert_eq!(session.context().history().len(), 1);
    }

    #[test]
    fn test_option_policy_from_config() {
        let mut strict = Session::from_config(&config()).unwrap();
        assert!(strict.submit("deploy --force").is_failed());

        let mut config = config();
        config.parser.option_policy = OptionPolicy::Accept;
        let mut lenient = Session::from_config(&config).unwrap();
        match lenient.submit("deploy --force --env=prod") {
            Submission::Command(parsed) => {
                assert!(parsed.has_flag("force"));
                assert_eq!(parsed.option("env").unwrap(), "prod");
            }
            other => panic!("unexpected submission: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_registration_is_fatal() {
        let mut config = config();
        config.commands.push(CommandConfig::new("b"));

        assert!(matches!(
            Session::from_config(&config),
            Err(RuntimeError::Registry(RegistryError::DuplicateCommand { .. }))
        ));
    }

    #[test]
    fn test_complete() {
        let session = Session::from_config(&config()).unwrap();
        assert_eq!(session.complete("dep")[0], "deploy");

        assert_eq!(session.complete("!gr")[0], "!grep");
    }

    #[test]
    fn test_register_after_start() {
        let mut session = Session::default();
        session.register(CommandMetadata::new("status")).unwrap();
        assert!(matches!(session.submit("status"), Submission::Command(_)));
    }
}

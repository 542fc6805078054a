//! Configuration validation utilities.

use std::collections::HashMap;

use super::error::{ConfigError, ConfigResult};
use super::schema::{CommandConfig, LogOutput, LoggingConfig, ParleyConfig, ParserConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &ParleyConfig) -> ConfigResult<()> {
    validate_logging_config(&config.logging)?;
    validate_parser_config(&config.parser)?;
    validate_commands_config(&config.commands)?;
    Ok(())
}

/// Validates logging settings.
///
/// Level names are already checked by deserialization into `LogLevel`.
fn validate_logging_config(logging: &LoggingConfig) -> ConfigResult<()> {
    if logging.output == LogOutput::File && logging.file_path.is_none() {
        return Err(ConfigError::missing_field("logging.file_path"));
    }

    if logging.filters.keys().any(|target| target.trim().is_empty()) {
        return Err(ConfigError::validation("Log filter targets cannot be empty"));
    }

    Ok(())
}

/// Validates parser settings.
fn validate_parser_config(parser: &ParserConfig) -> ConfigResult<()> {
    if parser.suggestion_limit == 0 {
        return Err(ConfigError::validation(
            "Suggestion limit must be greater than 0",
        ));
    }

    let prefix = parser.shell_prefix;
    if prefix.is_alphanumeric() || prefix.is_whitespace() || matches!(prefix, '"' | '\'' | '\\') {
        return Err(ConfigError::validation(format!(
            "Invalid shell prefix {prefix:?}: must be a symbol other than a quote or backslash"
        )));
    }

    Ok(())
}

/// Validates the configured commands, including name clashes between them.
fn validate_commands_config(commands: &[CommandConfig]) -> ConfigResult<()> {
    let mut owners: HashMap<&str, &str> = HashMap::new();

    for command in commands {
        validate_name(&command.name, "commands.name")?;

        for name in std::iter::once(&command.name).chain(&command.aliases) {
            validate_name(name, "commands.aliases")?;
            if let Some(existing) = owners.insert(name, &command.name) {
                return Err(ConfigError::DuplicateCommand {
                    name: name.clone(),
                    existing: existing.to_string(),
                });
            }
        }
    }

    Ok(())
}

fn validate_name(name: &str, field: &str) -> ConfigResult<()> {
    if name.is_empty() {
        return Err(ConfigError::missing_field(field));
    }
    if name.contains(char::is_whitespace) {
        return Err(ConfigError::validation(format!(
            "Command name '{name}' cannot contain whitespace"
        )));
    }
    Ok(())
}

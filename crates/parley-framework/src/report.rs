//! Plain-text rendering of parse errors for terminal front ends.

use std::fmt::Write;

use parley_core::{ParseError, ParseErrorKind};

/// Short human title for an error kind.
pub fn title(kind: ParseErrorKind) -> &'static str {
    match kind {
        ParseErrorKind::UnterminatedQuote => "Unterminated quote",
        ParseErrorKind::UnknownCommand => "Unknown command",
        ParseErrorKind::UnrecognizedOption => "Unrecognized option",
        ParseErrorKind::MissingOptionValue => "Missing option value",
        ParseErrorKind::UnexpectedFlagValue => "Unexpected flag value",
        ParseErrorKind::NoParserMatched => "Unrecognized input",
        ParseErrorKind::EmptyInput => "Empty input",
        ParseErrorKind::EmptyShellCommand => "Empty shell command",
    }
}

fn hint(error: &ParseError) -> Option<String> {
    match error {
        ParseError::UnterminatedQuote { quote, .. } => {
            Some(format!("Close the {quote} quote or continue on the next line."))
        }
        ParseError::UnrecognizedOption { declared, .. } if !declared.is_empty() => {
            let list = declared
                .iter()
                .map(|o| format!("--{o}"))
                .collect::<Vec<_>>()
                .join(", ");
            Some(format!("Accepted options: {list}"))
        }
        ParseError::EmptyShellCommand { prefix, .. } => {
            Some(format!("Type a command after '{prefix}'."))
        }
        _ => None,
    }
}

/// Renders an error as a title, the message, an optional hint, and a
/// "Did you mean" list when suggestions exist.
///
/// ```text
/// Unknown command
///
/// unknown command 'buidl'
///
/// Did you mean:
///   • build
///   • bundle
/// ```
pub fn render_error(error: &ParseError) -> String {
    let mut out = String::new();
    let _ = write!(out, "{}\n\n{error}", title(error.kind()));

    if let Some(hint) = hint(error) {
        let _ = write!(out, "\n{hint}");
    }

    let suggestions = error.suggestions();
    if !suggestions.is_empty() {
        out.push_str("\n\nDid you mean:");
        for suggestion in suggestions {
            let _ = write!(out, "\n  • {suggestion}");
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use parley_core::{CommandId, OptionKey};

    use super::*;

    #[test]
    fn test_unknown_command_lists_suggestions() {
        let err = ParseError::UnknownCommand {
            raw_input: "buidl".into(),
            command: CommandId::new("buidl"),
            suggestions: vec![CommandId::new("build"), CommandId::new("bundle")],
        };

        assert_eq!(
            render_error(&err),
            "Unknown command\n\nunknown command 'buidl'\n\nDid you mean:\n  • build\n  • bundle"
        );
    }

    #[test]
    fn test_no_suggestion_section_when_empty() {
        let err = ParseError::no_parser_matched("???");
        let text = render_error(&err);
        assert!(text.starts_with("Unrecognized input\n\n"));
        assert!(!text.contains("Did you mean"));
    }

    #[test]
    fn test_hints() {
        let err = ParseError::UnrecognizedOption {
            raw_input: "build --x".into(),
            command: CommandId::new("build"),
            option: OptionKey::new("x"),
            declared: vec![OptionKey::new("jobs"), OptionKey::new("target")],
        };
        assert!(render_error(&err).ends_with("Accepted options: --jobs, --target"));

        let err = ParseError::EmptyShellCommand {
            raw_input: "!".into(),
            prefix: '!',
        };
        assert!(render_error(&err).contains("Type a command after '!'."));
    }
}

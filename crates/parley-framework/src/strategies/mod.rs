//! Built-in parser strategies.

mod shell;
mod text;

pub use shell::{DEFAULT_SHELL_COMMANDS, DEFAULT_SHELL_PREFIX, ShellStrategy};
pub use text::{OptionPolicy, TextStrategy};

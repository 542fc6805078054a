//! Parley REPL Example
//!
//! A small interactive shell wired to a Parley [`Session`].
//!
//! - `build --release --target=x86 main.rs` parses against the registry
//! - `!ls -la` is handed over as a shell payload (printed, never executed)
//! - `?bu` lists completions for a partial line
//! - `help` lists the registered commands, `exit` quits
//!
//! # Usage
//!
//! ```bash
//! cargo run --package parley-repl -- --log-level debug
//! cargo run --package parley-repl -- --config parley.toml --json
//! ```

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use parley::core::to_raw;
use parley::prelude::*;
use parley::runtime::logging;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[derive(Parser)]
#[command(name = "parley-repl")]
#[command(about = "Interactive shell for the Parley command parser")]
struct Cli {
    /// Configuration file (defaults to parley.toml in the current directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Configuration profile, e.g. development or production
    #[arg(short, long)]
    profile: Option<String>,

    /// Overrides the configured log level
    #[arg(long)]
    log_level: Option<String>,

    /// Print parse results as JSON
    #[arg(long)]
    json: bool,
}

/// Commands available when the configuration declares none.
fn builtin_commands() -> Vec<CommandMetadata> {
    vec![
        CommandMetadata::new("help")
            .alias("?")
            .description("List available commands")
            .category("session"),
        CommandMetadata::new("exit")
            .alias("quit")
            .description("Leave the shell")
            .category("session"),
        CommandMetadata::new("build")
            .alias("b")
            .description("Build a target")
            .flag("release")
            .flag("verbose")
            .option("target")
            .category("project"),
        CommandMetadata::new("deploy")
            .description("Deploy to an environment")
            .option("env")
            .flag("dry-run")
            .category("project"),
        CommandMetadata::new("status")
            .description("Show project status")
            .category("project"),
    ]
}

fn print_help(session: &Session) {
    let registry = session.registry();
    for category in registry.categories() {
        println!("{category}:");
        for meta in registry.list(Some(&category)) {
            println!("  {:<10} {}", meta.id.as_str(), meta.description);
        }
    }
}

fn print_command(parsed: &ParseResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&to_raw(parsed))?);
        return Ok(());
    }

    println!("command:   {}", parsed.command());
    if !parsed.arguments().is_empty() {
        let arguments: Vec<&str> = parsed.arguments().iter().map(|a| a.as_str()).collect();
        println!("arguments: {}", arguments.join(" "));
    }
    for (key, value) in parsed.options() {
        println!("option:    {key} = {value}");
    }
    for flag in parsed.flags() {
        println!("flag:      {flag}");
    }
    Ok(())
}

fn prompt() -> Result<()> {
    print!("parley> ");
    std::io::stdout().flush()?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new().with_current_dir();
    if let Some(path) = &cli.config {
        loader = loader.file(path);
    }
    if let Some(profile) = &cli.profile {
        loader = loader.profile(profile);
    }
    if let Some(level) = &cli.log_level {
        loader = loader.set("logging.level", level.to_lowercase());
    }
    let config = loader.load()?;
    logging::init_from_config(&config.logging);

    let mut session = Session::from_config(&config)?;
    if config.commands.is_empty() {
        for command in builtin_commands() {
            session.register(command)?;
        }
    }
    info!(commands = session.registry().len(), "Parley REPL started");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt()?;
    while let Some(line) = lines.next_line().await? {
        if let Some(partial) = line.strip_prefix('?').filter(|p| !p.is_empty()) {
            for candidate in session.complete(partial) {
                println!("{candidate}");
            }
            prompt()?;
            continue;
        }

        match session.submit(&line) {
            Submission::Noop => {}
            Submission::Command(parsed) => match parsed.command().as_str() {
                "exit" => break,
                "help" => print_help(&session),
                _ => print_command(&parsed, cli.json)?,
            },
            Submission::Shell(payload) => println!("would run: {payload}"),
            Submission::Failed(error) => eprintln!("{}\n", render_error(&error)),
        }
        prompt()?;
    }

    info!(lines = session.context().history().len(), "Parley REPL finished");
    Ok(())
}

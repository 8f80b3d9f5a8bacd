//! keel CLI
//!
//! Resolves the layout of a project directory and prints it as JSON.
//! Fatal diagnostics are rendered by the console sink, which exits with
//! status 1 after flushing.

mod cli;

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use keel_core::{ConsoleSink, layout};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> keel_core::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Resolve { path, compact }) => cmd_resolve(path, compact),
        None => cmd_resolve(None, false),
    }
}

fn cmd_resolve(path: Option<PathBuf>, compact: bool) -> keel_core::Result<()> {
    let root = match path {
        Some(path) => path,
        None => std::env::current_dir().map_err(|e| keel_fs::Error::io(".", e))?,
    };

    let sink = ConsoleSink::new();
    let layout = layout::create(root, &sink)?;

    let rendered = if compact {
        serde_json::to_string(&layout)?
    } else {
        serde_json::to_string_pretty(&layout)?
    };
    println!("{rendered}");
    Ok(())
}

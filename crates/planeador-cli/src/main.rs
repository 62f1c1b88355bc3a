//! Planeador CLI - Household finance planner
//!
//! Usage:
//!   planeador plan --file snapshot.toml     Compute and print the plan
//!   planeador plan --json                   Plan for the default snapshot, as JSON
//!   planeador template --format json        Print a starter snapshot

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Plan { file, today, json } => {
            let path = commands::resolve_snapshot_path(file)?;
            let today = commands::resolve_today(today.as_deref())?;
            commands::cmd_plan(&path, today, json)
        }
        Commands::Template { format } => commands::cmd_template(&format),
    }
}

//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Planeador - Plano financeiro para a família
#[derive(Parser)]
#[command(name = "planeador")]
#[command(about = "Household finance planner for Portuguese households", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the plan for a snapshot file
    Plan {
        /// Snapshot file (.json or .toml); defaults to the data directory
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Planning date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        today: Option<String>,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a starter snapshot
    Template {
        /// Output format: json, toml
        #[arg(short, long, default_value = "toml")]
        format: String,
    },
}

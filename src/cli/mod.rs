//! Command-line interface for Vitalog.
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// Vitalog - offline-first vital sign tracker
/// Records readings locally and replicates them when the backend is reachable
#[derive(Parser)]
#[command(name = "vitalog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account
    Register {
        #[arg(long, short = 'u')]
        username: String,

        #[arg(long, short = 'p')]
        password: String,

        /// Birthdate as YYYY-MM-DD
        #[arg(long, short = 'b')]
        birthdate: String,

        #[arg(long)]
        full_name: Option<String>,

        #[arg(long)]
        email: Option<String>,
    },

    /// Verify credentials and show the account
    Login {
        #[arg(long, short = 'u')]
        username: String,

        #[arg(long, short = 'p')]
        password: String,
    },

    /// Record a vital reading
    #[command(alias = "a")]
    Add {
        #[arg(long, short = 'u')]
        username: String,

        #[arg(long, short = 'p')]
        password: String,

        /// Reading date as YYYY-MM-DD (defaults to today)
        #[arg(long, short = 'd')]
        date: Option<String>,

        /// Blood pressure, e.g. "120/80" or "120"
        #[arg(long)]
        pressure: Option<String>,

        /// Glucose in mg/dL
        #[arg(long)]
        glucose: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Show reading history, newest first
    #[command(alias = "ls", alias = "l")]
    List {
        #[arg(long, short = 'u')]
        username: String,

        #[arg(long, short = 'p')]
        password: String,
    },

    /// Export reading history as CSV
    Export {
        #[arg(long, short = 'u')]
        username: String,

        #[arg(long, short = 'p')]
        password: String,

        /// Output file (stdout when omitted)
        #[arg(long, short = 'o')]
        output: Option<std::path::PathBuf>,
    },

    /// Replicate pending local changes to the backend now
    #[command(alias = "s")]
    Sync,

    /// Show the replication queue
    Outbox {
        /// Number of recent entries to show
        #[arg(default_value = "10")]
        limit: u64,
    },

    /// Run the replication endpoint
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;

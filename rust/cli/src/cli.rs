//! Command-line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "headsup",
    version,
    about = "Heads-up poker betting engine for learning agents"
)]
pub struct HeadsupCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play policies against each other and summarise the results
    Sim {
        #[arg(long)]
        hands: u64,
        #[arg(long)]
        seed: Option<u64>,
        /// JSONL file receiving one record per finished hand
        #[arg(long)]
        output: Option<PathBuf>,
        /// Policy for the learning seat
        #[arg(long, default_value = "random")]
        player: String,
        /// Policy for the opposing seat (defaults to the configured one)
        #[arg(long)]
        opponent: Option<String>,
    },
    /// Start one hand and show the table
    Deal {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

/// Subcommand names, listed in the usage text on parse errors.
pub const COMMANDS: &[&str] = &["sim", "deal", "cfg"];

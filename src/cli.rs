//! Command-line interface for gomoku.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gomoku - five in a row against a greedy computer opponent
#[derive(Parser, Debug)]
#[command(name = "gomoku")]
#[command(about = "Play gomoku against the computer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the host configuration file
    #[arg(short, long, global = true, default_value = "gomoku.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively on the terminal
    Play {
        /// Seed for the computer's tie-breaking
        #[arg(long)]
        seed: Option<u64>,

        /// Computer think delay in milliseconds
        #[arg(long)]
        think_ms: Option<u64>,
    },

    /// Play a full game with random moves on the human side
    Autoplay {
        /// Seed for both the computer and the random player
        #[arg(long)]
        seed: Option<u64>,

        /// Computer think delay in milliseconds
        #[arg(long, default_value = "0")]
        think_ms: u64,

        /// Print the final game state as JSON
        #[arg(long)]
        json: bool,
    },
}

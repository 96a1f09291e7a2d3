//! # SeaDawg CLI Module
//!
//! Every command builds a fresh in-memory index from `--words` (one word
//! per line, or a JSON array of strings for `.json` files).
//!
//! ## Available Commands
//!
//! - `status` - Show index metrics
//! - `query` - Exact, prefix or substring lookup
//! - `delete` - Delete words, then re-check the graph
//! - `dump` - Write the graph as JSON
//! - `thrash` - Randomized stress rounds
//! - `replay` - Re-run captured failing word lists

mod commands;

use crate::config::AppConfig;
use crate::error::CliError;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// SeaDawg - compact word graph index
///
/// Indexes a word list in a CDAWG and answers exact, prefix and substring
/// queries against it.
#[derive(Parser, Debug)]
#[command(name = "seadawg")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Word list to index (text: one per line; .json: array of strings)
    #[arg(short, long, global = true)]
    pub words: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Lookup flavour for `query`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    Exact,
    Prefix,
    Substring,
}

impl QueryMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Prefix => "prefix",
            Self::Substring => "substring",
        }
    }
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show index metrics
    Status,

    /// Look up words in the index
    Query {
        /// Lookup mode
        #[arg(short, long, value_enum, default_value = "exact")]
        mode: QueryMode,

        /// Query text
        text: String,
    },

    /// Delete words, then verify the remaining graph
    Delete {
        /// Words to delete
        #[arg(required = true)]
        texts: Vec<String>,
    },

    /// Dump the graph as JSON
    Dump {
        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build random indexes until something breaks
    Thrash {
        /// Override the configured number of rounds
        #[arg(short, long)]
        rounds: Option<usize>,

        /// Override the configured seed
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Re-run every captured word list in a directory
    Replay {
        /// Directory of JSON word lists
        #[arg(short, long, default_value = "bad_states")]
        dir: PathBuf,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), CliError> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    let json_mode = cli.json_mode;
    let words = cli.words.as_deref();

    match cli.command {
        Some(Commands::Status) | None => cmd_status(&config, words, json_mode),
        Some(Commands::Query { mode, text }) => cmd_query(&config, words, json_mode, mode, &text),
        Some(Commands::Delete { texts }) => cmd_delete(&config, words, json_mode, &texts),
        Some(Commands::Dump { output }) => cmd_dump(&config, words, output.as_deref()),
        Some(Commands::Thrash { rounds, seed }) => {
            if let Some(rounds) = rounds {
                config.thrash.rounds = rounds;
            }
            if let Some(seed) = seed {
                config.thrash.seed = seed;
            }
            cmd_thrash(&config, json_mode)
        }
        Some(Commands::Replay { dir }) => cmd_replay(&config, json_mode, &dir),
    }
}

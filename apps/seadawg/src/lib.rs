//! # seadawg
//!
//! Command-line front end for [`seadawg_core`]: builds an in-memory index
//! from a word list, answers queries, dumps the graph, and stress-tests the
//! engine with randomized word lists.

pub mod cli;
pub mod config;
pub mod error;

pub use config::{AppConfig, ThrashConfig};
pub use error::CliError;

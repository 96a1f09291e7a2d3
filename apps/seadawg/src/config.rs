//! # Application Configuration
//!
//! Loaded from a TOML file passed with `--config`:
//!
//! ```toml
//! [engine]
//! verify_invariants = true
//!
//! [engine.duplicate_filter]
//! initial_capacity = 256
//!
//! [thrash]
//! rounds = 10
//! words_per_round = 200
//! ```
//!
//! Missing tables and fields fall back to their defaults.

use crate::error::CliError;
use seadawg_core::SeaDawgConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Maximum config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Symbols drawn for thrash words.
pub const ALPHANUMERIC: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Passed through to every index the CLI builds.
    pub engine: SeaDawgConfig,
    pub thrash: ThrashConfig,
}

/// Shape of the randomized stress run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThrashConfig {
    /// Fresh indexes built, one per round.
    pub rounds: usize,
    pub words_per_round: usize,
    pub word_length: usize,
    /// Symbols words are drawn from; small alphabets repeat factors more.
    pub alphabet: String,
    /// Generator seed; the same seed replays the same rounds.
    pub seed: u64,
    /// Delete every other word after each round and re-check the rest.
    pub delete_half: bool,
    /// Where failing word lists are written.
    pub failure_dir: PathBuf,
}

impl Default for ThrashConfig {
    fn default() -> Self {
        Self {
            rounds: 50,
            words_per_round: 500,
            word_length: 128,
            alphabet: ALPHANUMERIC.to_string(),
            seed: 0x5EAD_A116,
            delete_half: true,
            failure_dir: PathBuf::from("bad_states"),
        }
    }
}

impl AppConfig {
    /// Parse a TOML document and validate it.
    pub fn from_toml_str(content: &str) -> Result<Self, CliError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read `path`, or return the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let metadata = std::fs::metadata(path).map_err(|e| CliError::io(path, e))?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(CliError::InvalidInput(format!(
                "config file size {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }
        let content = std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CliError> {
        self.engine.validate()?;
        self.thrash.validate()
    }
}

impl ThrashConfig {
    pub fn validate(&self) -> Result<(), CliError> {
        if self.words_per_round == 0 {
            return Err(CliError::InvalidInput(
                "thrash.words_per_round must be positive".to_string(),
            ));
        }
        if self.alphabet.is_empty() {
            return Err(CliError::InvalidInput(
                "thrash.alphabet must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config = AppConfig::from_toml_str("").expect("parse");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_tables_keep_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [engine]
            verify_invariants = true

            [engine.duplicate_filter]
            initial_capacity = 8

            [thrash]
            rounds = 3
            alphabet = "ab"
            "#,
        )
        .expect("parse");
        assert!(config.engine.verify_invariants);
        assert_eq!(config.engine.duplicate_filter.initial_capacity, 8);
        assert_eq!(config.thrash.rounds, 3);
        assert_eq!(config.thrash.alphabet, "ab");
        assert_eq!(config.thrash.word_length, 128);
    }

    #[test]
    fn unknown_field_rejected() {
        let result = AppConfig::from_toml_str("[thrash]\nrondus = 3\n");
        assert!(matches!(result, Err(CliError::Toml(_))));
    }

    #[test]
    fn invalid_engine_limits_rejected() {
        let result = AppConfig::from_toml_str("[engine]\nmax_text_length = 0\n");
        assert!(matches!(result, Err(CliError::Core(_))));

        let result = AppConfig::from_toml_str("[thrash]\nalphabet = \"\"\n");
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn missing_path_uses_defaults() {
        let config = AppConfig::load(None).expect("load");
        assert_eq!(config.thrash.rounds, 50);
    }
}

//! # CLI Errors

use seadawg_core::SeaDawgError;
use std::path::PathBuf;
use thiserror::Error;

/// Everything a command can fail with.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] SeaDawgError),

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A thrash round broke the engine; its word list was captured.
    #[error("thrash round {round} failed ({detail}); words saved to '{}'", saved.display())]
    ThrashFailure {
        round: usize,
        detail: String,
        saved: PathBuf,
    },

    /// A captured word list still breaks the engine.
    #[error("replay of '{}' failed: {detail}", path.display())]
    ReplayFailure { path: PathBuf, detail: String },
}

impl CliError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

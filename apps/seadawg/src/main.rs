//! # SeaDawg CLI
//!
//! The binary front end for the seadawg-core word index.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                 apps/seadawg (THE BINARY)             │
//! │                                                       │
//! │  ┌─────────────┐    ┌─────────────┐    ┌──────────┐   │
//! │  │   CLI       │    │  AppConfig  │    │  Thrash  │   │
//! │  │  (clap)     │    │   (toml)    │    │ / Replay │   │
//! │  └──────┬──────┘    └──────┬──────┘    └────┬─────┘   │
//! │         └──────────────────┼────────────────┘         │
//! │                            ▼                          │
//! │                    ┌───────────────┐                  │
//! │                    │ seadawg-core  │                  │
//! │                    │ (THE ENGINE)  │                  │
//! │                    └───────────────┘                  │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! seadawg --words words.txt status
//! seadawg --words words.txt query --mode substring dawg
//! seadawg --config seadawg.toml thrash
//! seadawg replay --dir bad_states
//! ```

use clap::Parser;
use seadawg::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // SEADAWG_LOG_FORMAT=json switches to machine-parseable output.
    let log_format = std::env::var("SEADAWG_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let cli = cli::Cli::parse();

    let default_filter = if cli.verbose {
        "seadawg=debug,seadawg_core=debug"
    } else {
        "seadawg=info,seadawg_core=warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner to stderr, keeping stdout for command output.
fn print_banner() {
    eprintln!(
        r#"
  ~~~ SeaDawg v{} ~~~
  Compact word graph: exact, prefix and substring lookup
"#,
        env!("CARGO_PKG_VERSION")
    );
}

//! # Birthday Journey
//!
//! The main binary for the birthday journey.
//!
//! This application provides:
//! - The twelve-step journey, played in the terminal
//! - A passphrase-protected viewer for the messages left at the end
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     apps/journey (THE BINARY)                   │
//! │                                                                 │
//! │  ┌─────────────┐    ┌─────────────┐    ┌──────────────────┐   │
//! │  │   CLI       │    │  Terminal   │    │  JSON file store │   │
//! │  │  (clap)     │    │  (tokio)    │    │  + admin viewer  │   │
//! │  └──────┬──────┘    └──────┬──────┘    └────────┬─────────┘   │
//! │         │                  │                    │              │
//! │         └──────────────────┼────────────────────┘              │
//! │                            ▼                                   │
//! │                    ┌───────────────┐                           │
//! │                    │ journey-core  │                           │
//! │                    │ (THE LOGIC)   │                           │
//! │                    └───────────────┘                           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Play
//! journey
//!
//! # Read the messages
//! journey messages list --key <passphrase>
//! journey messages export -o BirthdayMessages.txt
//! ```

use clap::Parser;
use journey::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // JOURNEY_LOG_FORMAT=json enables machine-parseable output. Logs go to
    // stderr; stdout belongs to the journey.
    let log_format = std::env::var("JOURNEY_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "journey=info,journey_core=info".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet {
        print_banner();
    }

    let code = match cli::execute(cli).await {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!("Error: {}", e);
            1
        }
    };

    // The stdin reader thread cannot be cancelled; exit without waiting on it.
    std::process::exit(code);
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
  🎂  B I R T H D A Y   J O U R N E Y  🎂

  v{}

  Twelve steps • One surprise • Type `help` anytime
"#,
        env!("CARGO_PKG_VERSION")
    );
}

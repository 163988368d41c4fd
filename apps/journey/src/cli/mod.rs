//! # Journey CLI Module
//!
//! ## Available Commands
//!
//! - `play` - Run the journey in the terminal (default)
//! - `messages list` - Show stored feedback, newest first
//! - `messages export` - Write the plain-text export
//! - `messages clear` - Delete every stored message
//!
//! The `messages` commands ask for the admin passphrase unless `--key` is given.

mod commands;

use crate::config::JourneyConfig;
use clap::{Parser, Subcommand};
use journey_core::JourneyError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Birthday Journey
///
/// A twelve-step birthday surprise, played in the terminal.
#[derive(Parser, Debug)]
#[command(name = "journey")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML config file (default: ./journey.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the feedback store (overrides config and JOURNEY_STORE)
    #[arg(short = 'S', long, global = true)]
    pub store: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play the journey
    Play,

    /// Read or manage the stored feedback messages
    Messages {
        /// Admin passphrase (prompted for when omitted)
        #[arg(short, long)]
        key: Option<String>,

        #[command(subcommand)]
        action: MessagesCommand,
    },
}

/// Message viewer operations.
#[derive(Subcommand, Debug)]
pub enum MessagesCommand {
    /// List messages, newest first
    List {
        /// Output raw JSON records
        #[arg(long)]
        json: bool,
    },

    /// Export every message as plain text
    Export {
        /// Output file path
        #[arg(short, long, default_value = "BirthdayMessages.txt")]
        output: PathBuf,
    },

    /// Delete all messages
    Clear {
        /// Confirm the deletion
        #[arg(short, long)]
        yes: bool,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), JourneyError> {
    let config = JourneyConfig::load(cli.config.as_deref())?
        .with_env()
        .with_store(cli.store);

    tracing::debug!(
        store = %config.store_path.display(),
        tick_interval_ms = config.tick_interval_ms,
        "Configuration resolved"
    );

    match cli.command {
        None | Some(Commands::Play) => cmd_play(&config).await,
        Some(Commands::Messages { key, action }) => {
            authorize_viewer(&config, key)?;
            match action {
                MessagesCommand::List { json } => cmd_messages_list(&config, json),
                MessagesCommand::Export { output } => cmd_messages_export(&config, &output),
                MessagesCommand::Clear { yes } => cmd_messages_clear(&config, yes),
            }
        }
    }
}

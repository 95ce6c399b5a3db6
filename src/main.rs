// clipflash - copy blockchain identifiers with transient confirmation
//
// Lists account addresses, contract IDs, transaction hashes and the like in
// a terminal UI and copies them to the clipboard on a keypress. Each copy is
// confirmed with a toast and a check mark that resets on its own.
//
// Architecture:
// - Copy unit: clipboard write + notification + self-resetting copied flag
// - Clipboard backends: native (arboard) or terminal (OSC 52)
// - TUI (ratatui): entry list, toasts, logs panel
// - CLI (clap): one-shot `copy` and `config` management

mod cli;
mod config;
mod copy;
mod entries;
mod logging;
mod tui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use entries::Entry;
use logging::{LogBuffer, LogOutput};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config { show, reset, path }) => {
            cli::handle_config(show, reset, path);
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Copy {
            text,
            label,
            no_wait,
        }) => {
            let config = Config::from_env();
            let log_buffer = LogBuffer::new();
            // Returning (not process::exit) lets the guard flush the log file
            let _file_guard = logging::init(&config.logging, LogOutput::Stderr, &log_buffer);

            if cli::handle_copy(&config, &text, label.as_deref(), !no_wait).await {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        None => {
            run_interactive(cli.values).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Load config, set up logging and run the TUI until the user quits
async fn run_interactive(values: Vec<String>) -> Result<()> {
    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();
    let config = Config::from_env();

    // Logs go to the in-memory buffer so they don't garble the display
    let log_buffer = LogBuffer::new();
    let _file_guard = logging::init(&config.logging, LogOutput::Tui, &log_buffer);

    let entries: Vec<Entry> = config
        .entries
        .iter()
        .map(|e| e.to_entry())
        .chain(values.iter().map(|v| Entry::parse(v)))
        .collect();
    tracing::info!("Loaded {} entries", entries.len());

    if let Err(e) = tui::run_tui(entries, config, log_buffer).await {
        tracing::error!("TUI error: {:?}", e);
        return Err(e);
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

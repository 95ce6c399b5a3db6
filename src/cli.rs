// CLI module - command-line argument parsing and handlers
//
// Provides:
// - clipflash [VALUES]...: run the TUI over saved and given entries
// - copy <TEXT> [--label]: one-shot copy with a stderr notification
// - config --show | --path | --reset: configuration management

use crate::config::{Config, VERSION};
use crate::copy::{ClipboardBackend, CopyUnit, Osc52Clipboard, StderrNotifier, SystemClipboard};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::sync::Arc;

/// clipflash - copy blockchain identifiers with a flash of confirmation
#[derive(Parser, Debug)]
#[command(name = "clipflash")]
#[command(version = VERSION)]
#[command(about = "Copy blockchain identifiers to the clipboard", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Identifiers to list in the TUI (`name=value` or `value`)
    pub values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy a single value and exit (status 1 if the copy failed)
    ///
    /// On Linux without a clipboard manager the system backend keeps running
    /// until another copy replaces the text, since the text disappears with
    /// the process that owns it.
    Copy {
        /// Text to place on the clipboard
        text: String,

        /// Confirmation message shown on success
        #[arg(long, short)]
        label: Option<String>,

        /// Exit right after writing, even if the text may not outlive the process
        #[arg(long)]
        no_wait: bool,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// Copy once with the configured backend; returns whether it succeeded
///
/// With the system backend and `wait`, returns only once the copied text no
/// longer depends on this process.
pub async fn handle_copy(config: &Config, text: &str, label: Option<&str>, wait: bool) -> bool {
    let settings = config.copy.settings();
    match config.copy.clipboard {
        ClipboardBackend::System => {
            let clipboard = Arc::new(if wait {
                SystemClipboard::waiting()
            } else {
                SystemClipboard::default()
            });
            let unit = CopyUnit::with_settings(Arc::clone(&clipboard), StderrNotifier, settings);
            let copied = unit.copy(text, label).await;
            if copied && clipboard.is_serving() {
                eprintln!("Keeping the text available until it is replaced (Ctrl-C to stop)");
                clipboard.wait_for_handoff().await;
            }
            copied
        }
        ClipboardBackend::Osc52 => {
            let unit = CopyUnit::with_settings(Osc52Clipboard::stdout(), StderrNotifier, settings);
            unit.copy(text, label).await
        }
    }
}

/// Handle `config` flags
pub fn handle_config(show: bool, reset: bool, path: bool) {
    if path {
        handle_config_path();
    } else if show {
        handle_config_show();
    } else if reset {
        handle_config_reset();
    } else {
        // No flag provided, show help
        println!("Usage: clipflash config [--show|--reset|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --path    Show config file path");
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show() {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        let _ = std::io::stderr().flush();

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).is_err()
            || !input.trim().eq_ignore_ascii_case("y")
        {
            println!("Aborted.");
            return;
        }
    }

    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            std::process::exit(1);
        }
    }

    if let Err(e) = std::fs::write(&path, Config::default().to_toml()) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config reset to defaults: {}", path.display());
}

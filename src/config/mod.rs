//! Configuration for clipflash
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/clipflash/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod copy;
mod observability;
mod serialization;

#[cfg(test)]
mod tests;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports (maintain public API)
// ─────────────────────────────────────────────────────────────────────────────

pub use copy::{CopyConfig, FileCopy};
pub use observability::{FileLogging, LogFile, LogRotation, LoggingConfig};

use crate::entries::Entry;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Theme name: "dark" or "light"
    pub theme: String,

    /// Copy behavior: reset delay, labels, clipboard backend
    pub copy: CopyConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Saved identifiers shown in the TUI
    pub entries: Vec<EntryConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            copy: CopyConfig::default(),
            logging: LoggingConfig::default(),
            entries: Vec::new(),
        }
    }
}

/// A saved `[[entries]]` item
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct EntryConfig {
    pub name: Option<String>,
    pub value: String,
}

impl EntryConfig {
    pub fn to_entry(&self) -> Entry {
        Entry::new(self.name.clone(), self.value.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub theme: Option<String>,

    /// Optional [copy] section
    pub copy: Option<FileCopy>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,

    /// Optional [[entries]] list
    #[serde(default)]
    pub entries: Vec<EntryConfig>,
}

impl FileConfig {
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/clipflash/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("clipflash").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        // Write config (ignore errors - config is optional)
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists
    ///
    /// A file that exists but cannot be read or parsed is fatal: a broken
    /// config should fail fast, not silently fall back to defaults.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match FileConfig::parse(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                    eprintln!("║  CONFIG ERROR - Failed to parse configuration file          ║");
                    eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  Tip: Check for:\n");
                    eprintln!("    - Missing quotes around string values");
                    eprintln!("    - clipboard other than \"system\" or \"osc52\"");
                    eprintln!("    - rotation other than \"hourly\", \"daily\" or \"never\"");
                    eprintln!("    - [[entries]] items without a value\n");
                    eprintln!("  To reset, run `clipflash config --reset`.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Cannot read configuration file              ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: file -> env vars -> defaults
    pub fn from_env() -> Self {
        Self::resolve(Self::load_file_config(), |key| std::env::var(key).ok())
    }

    /// Merge a parsed file with environment lookups
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        // Theme: env > file > default
        let theme = env("CLIPFLASH_THEME")
            .or(file.theme)
            .unwrap_or_else(|| "dark".to_string());

        let mut copy = CopyConfig::from_file(file.copy);
        if let Some(raw) = env("CLIPFLASH_CLIPBOARD") {
            match raw.parse::<crate::copy::ClipboardBackend>() {
                Ok(backend) => copy.clipboard = backend,
                Err(e) => eprintln!("Warning: ignoring CLIPFLASH_CLIPBOARD: {}", e),
            }
        }
        if let Some(ms) = env("CLIPFLASH_RESET_DELAY_MS").and_then(|v| v.parse().ok()) {
            copy.reset_delay_ms = ms;
        }

        let mut logging = LoggingConfig::from_file(file.logging);
        if let Some(level) =
            env("CLIPFLASH_LOG_LEVEL").and_then(|l| observability::normalize_level(&l))
        {
            logging.level = level;
        }
        if let Some(dir) = env("CLIPFLASH_LOG_DIR").filter(|d| !d.trim().is_empty()) {
            logging.log_to_dir(dir);
        }

        // Entries without a value carry nothing to copy
        let entries = file
            .entries
            .into_iter()
            .filter(|e| !e.value.trim().is_empty())
            .collect();

        Self {
            theme,
            copy,
            logging,
            entries,
        }
    }
}

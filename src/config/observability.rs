//! `[logging]` section: how chatty clipflash is and where the JSON log goes
//!
//! ```toml
//! [logging]
//! level = "debug"
//!
//! [logging.file]          # present = file logging on
//! dir = "/tmp/clipflash"
//! rotation = "hourly"
//! prefix = "clipflash"
//! ```

use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use tracing_appender::rolling::Rotation;

/// How often the JSON log file rolls over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    Never,
}

impl LogRotation {
    pub fn rotation(self) -> Rotation {
        match self {
            Self::Hourly => Rotation::HOURLY,
            Self::Daily => Rotation::DAILY,
            Self::Never => Rotation::NEVER,
        }
    }
}

impl fmt::Display for LogRotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        })
    }
}

/// Rolling JSON log file
#[derive(Debug, Clone, PartialEq)]
pub struct LogFile {
    pub dir: PathBuf,
    pub rotation: LogRotation,
    /// File name prefix; the appender adds the date ("clipflash.2024-01-15")
    pub prefix: String,
}

impl Default for LogFile {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            rotation: LogRotation::default(),
            prefix: "clipflash".to_string(),
        }
    }
}

/// `<local data dir>/clipflash/logs`, or `./logs` when the platform has none
pub fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("clipflash").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Lowercased tracing level name, `None` if `level` is not one
pub fn normalize_level(level: &str) -> Option<String> {
    level
        .trim()
        .parse::<tracing::Level>()
        .ok()
        .map(|l| l.as_str().to_lowercase())
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Level for clipflash's own events; RUST_LOG replaces the whole filter
    pub level: String,
    /// `None` keeps logs in the TUI buffer (or on stderr) only
    pub file: Option<LogFile>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// `[logging]` as written in the file
#[derive(Debug, Deserialize, Default)]
pub struct FileLogging {
    pub level: Option<String>,
    pub file: Option<FileLogFile>,
}

/// `[logging.file]` as written in the file
#[derive(Debug, Deserialize, Default)]
pub struct FileLogFile {
    pub dir: Option<PathBuf>,
    pub rotation: Option<LogRotation>,
    pub prefix: Option<String>,
}

impl LoggingConfig {
    pub fn from_file(file: Option<FileLogging>) -> Self {
        let file = file.unwrap_or_default();

        let level = match file.level {
            Some(raw) => normalize_level(&raw).unwrap_or_else(|| {
                eprintln!("Warning: unknown log level {:?} in config, using info", raw);
                "info".to_string()
            }),
            None => "info".to_string(),
        };

        let file = file.file.map(|f| {
            let defaults = LogFile::default();
            LogFile {
                dir: f.dir.unwrap_or(defaults.dir),
                rotation: f.rotation.unwrap_or(defaults.rotation),
                prefix: f
                    .prefix
                    .filter(|p| !p.trim().is_empty())
                    .unwrap_or(defaults.prefix),
            }
        });

        Self { level, file }
    }

    /// Turn file logging on in `dir`, keeping any other file settings
    pub fn log_to_dir(&mut self, dir: impl Into<PathBuf>) {
        self.file.get_or_insert_with(LogFile::default).dir = dir.into();
    }
}

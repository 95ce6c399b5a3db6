//! Copy configuration: reset delay, confirmation labels, clipboard backend

use serde::Deserialize;
use std::time::Duration;

use crate::copy::{
    ClipboardBackend, CopySettings, DEFAULT_FAILURE_MESSAGE, DEFAULT_RESET_DELAY,
    DEFAULT_SUCCESS_LABEL,
};

/// Copy configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CopyConfig {
    /// How long the copied indicator stays on (milliseconds)
    pub reset_delay_ms: u64,
    /// Success message when no kind-specific label applies
    pub success_label: String,
    /// Message shown for any clipboard failure
    pub failure_message: String,
    /// How long toasts stay on screen (milliseconds)
    pub toast_duration_ms: u64,
    /// Clipboard backend: system or osc52
    pub clipboard: ClipboardBackend,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            reset_delay_ms: DEFAULT_RESET_DELAY.as_millis() as u64,
            success_label: DEFAULT_SUCCESS_LABEL.to_string(),
            failure_message: DEFAULT_FAILURE_MESSAGE.to_string(),
            toast_duration_ms: 2000,
            clipboard: ClipboardBackend::System,
        }
    }
}

/// Copy settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileCopy {
    pub reset_delay_ms: Option<u64>,
    pub success_label: Option<String>,
    pub failure_message: Option<String>,
    pub toast_duration_ms: Option<u64>,
    pub clipboard: Option<ClipboardBackend>,
}

impl CopyConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileCopy>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            reset_delay_ms: file.reset_delay_ms.unwrap_or(defaults.reset_delay_ms),
            // Blank labels would produce empty toasts
            success_label: file
                .success_label
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.success_label),
            failure_message: file
                .failure_message
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.failure_message),
            toast_duration_ms: file.toast_duration_ms.unwrap_or(defaults.toast_duration_ms),
            clipboard: file.clipboard.unwrap_or(defaults.clipboard),
        }
    }

    /// Settings for the copy unit
    pub fn settings(&self) -> CopySettings {
        CopySettings {
            reset_delay: Duration::from_millis(self.reset_delay_ms),
            success_label: self.success_label.clone(),
            failure_message: self.failure_message.clone(),
        }
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }
}

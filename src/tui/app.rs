// TUI application state
//
// This module manages the state of the TUI application: the entry list,
// the selected row, the copy unit and its copied flag, toasts and UI toggles.

use super::components::Toast;
use super::theme::Theme;
use crate::config::Config;
use crate::copy::{ChannelNotifier, Clipboard, CopyUnit, Notification};
use crate::entries::Entry;
use crate::logging::LogBuffer;
use crossterm::event::KeyCode;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Copy unit as wired in the TUI: configured backend, toasts via channel
pub type SharedCopyUnit = Arc<CopyUnit<Box<dyn Clipboard>, ChannelNotifier>>;

/// Debounce duration for action keys (y, Y, n, l)
/// Prevents rapid-fire triggers on terminals that don't send release events
const ACTION_DEBOUNCE: Duration = Duration::from_millis(150);

/// Icon next to the most recently copied row while the flag is on
pub const COPIED_ICON: &str = "✓";

/// Icon for rows that can be copied
pub const COPY_ICON: &str = "⧉";

/// What part of the selected entry to copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    /// The value, confirmed with the kind's label ("Address copied")
    Value,
    /// The value, confirmed with the default label
    ValuePlain,
    /// The entry's name
    Name,
}

/// Main application state for the TUI
pub struct App {
    /// Identifiers shown in the list
    pub entries: Vec<Entry>,

    /// Index of the currently selected entry
    pub selected: usize,

    /// Copy unit shared with spawned copy tasks
    pub copy: SharedCopyUnit,

    /// Reactive view of the copy unit's flag
    copied: watch::Receiver<bool>,

    /// Row the last successful copy came from
    pub last_copied: Option<usize>,

    /// Active toast notification
    pub toast: Option<Toast>,

    /// How long toasts stay up
    toast_duration: Duration,

    /// Log buffer for system logs display
    pub log_buffer: LogBuffer,

    /// Whether the logs panel is visible
    pub show_logs: bool,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Current color theme
    pub theme: Theme,

    /// Last action key and when it fired (for debouncing)
    last_action: Option<(KeyCode, Instant)>,

    /// Row each in-flight copy was started from
    pending: Vec<(JoinHandle<bool>, usize)>,
}

impl App {
    pub fn new(
        entries: Vec<Entry>,
        copy: SharedCopyUnit,
        config: &Config,
        log_buffer: LogBuffer,
    ) -> Self {
        let copied = copy.subscribe();
        Self {
            entries,
            selected: 0,
            copy,
            copied,
            last_copied: None,
            toast: None,
            toast_duration: config.copy.toast_duration(),
            log_buffer,
            show_logs: true,
            should_quit: false,
            theme: Theme::from_name(&config.theme),
            last_action: None,
            pending: Vec::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────

    pub fn select_next(&mut self) {
        if !self.entries.is_empty() {
            self.selected = (self.selected + 1).min(self.entries.len() - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.entries.len().saturating_sub(1);
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.entries.get(self.selected)
    }

    pub fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
    }

    /// Returns true if the action key should fire (not a bounce)
    pub fn debounce(&mut self, key: KeyCode) -> bool {
        let now = Instant::now();
        if let Some((last_key, at)) = self.last_action {
            if last_key == key && now.duration_since(at) < ACTION_DEBOUNCE {
                return false;
            }
        }
        self.last_action = Some((key, now));
        true
    }

    // ─────────────────────────────────────────────────────────────────────
    // Copy
    // ─────────────────────────────────────────────────────────────────────

    /// Whether the copy flag is currently on
    pub fn is_copied(&self) -> bool {
        *self.copied.borrow()
    }

    /// Icon for row `idx`: check mark on the last copied row while flashed
    pub fn icon_for(&self, idx: usize) -> &'static str {
        if self.is_copied() && self.last_copied == Some(idx) {
            COPIED_ICON
        } else {
            COPY_ICON
        }
    }

    /// Start copying from the selected entry without blocking the UI
    ///
    /// Returns `false` when there is nothing to copy.
    pub fn start_copy(&mut self, target: CopyTarget) -> bool {
        let Some(entry) = self.selected_entry().cloned() else {
            return false;
        };

        tracing::debug!(kind = entry.kind.tag(), "Copy requested: {}", entry.display_name());

        let (text, label) = match target {
            CopyTarget::Value => (entry.value, entry.kind.copy_label()),
            CopyTarget::ValuePlain => (entry.value, None),
            CopyTarget::Name => match entry.name {
                Some(name) => (name, Some("Name copied")),
                None => {
                    self.show_toast("Entry has no name");
                    return false;
                }
            },
        };

        let unit = Arc::clone(&self.copy);
        let handle = tokio::spawn(async move { unit.copy(&text, label).await });
        self.pending.push((handle, self.selected));
        true
    }

    /// Collect finished copy tasks; successful ones move the check mark
    pub async fn reap_copies(&mut self) {
        let mut still_running = Vec::new();
        for (handle, row) in self.pending.drain(..) {
            if !handle.is_finished() {
                still_running.push((handle, row));
                continue;
            }
            match handle.await {
                Ok(true) => self.last_copied = Some(row),
                Ok(false) => {}
                Err(e) => tracing::error!("Copy task failed: {}", e),
            }
        }
        self.pending = still_running;
    }

    // ─────────────────────────────────────────────────────────────────────
    // Toasts
    // ─────────────────────────────────────────────────────────────────────

    /// Show a plain toast
    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::with_duration(message, self.toast_duration));
    }

    /// Show a toast for a copy notification
    pub fn handle_notification(&mut self, notification: Notification) {
        self.toast = Some(Toast::from_notification(&notification, self.toast_duration));
    }

    /// Drop the toast once it has been up long enough
    pub fn clear_expired_toast(&mut self) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }
    }
}

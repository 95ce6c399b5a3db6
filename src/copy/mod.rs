//! Copy-to-clipboard with transient confirmation
//!
//! [`CopyUnit`] writes text through a [`Clipboard`], reports the outcome
//! through a [`Notifier`], and exposes a `copied` flag that flashes `true`
//! after a successful copy and reverts on its own after a fixed delay.
//!
//! ```text
//!            copy() ok                     reset delay elapsed
//!   Idle ─────────────────▶ Flashed ─────────────────────────▶ Idle
//!  (false)                  (true)  ◀──┐
//!                              │       │ copy() ok: timer replaced
//!                              └───────┘
//!   copy() failed: no transition, flag left as it was
//! ```
//!
//! The reversion timer is an owned task handle. Each successful copy cancels
//! the pending one and arms a new one; dropping the unit cancels it.

pub mod clipboard;
pub mod notify;

pub use clipboard::{
    clipboard_from_backend, Clipboard, ClipboardBackend, ClipboardError, Osc52Clipboard,
    SystemClipboard,
};
pub use notify::{ChannelNotifier, Notification, NotificationKind, Notifier, StderrNotifier};

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tokio::time::Instant;

/// How long `copied` stays `true` after a successful copy
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_millis(2000);

/// Success message used when the caller gives no label
pub const DEFAULT_SUCCESS_LABEL: &str = "Copied to clipboard";

/// Failure message, whatever the underlying cause
pub const DEFAULT_FAILURE_MESSAGE: &str = "Failed to copy";

/// Tunables for a [`CopyUnit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopySettings {
    pub reset_delay: Duration,
    pub success_label: String,
    pub failure_message: String,
}

impl Default for CopySettings {
    fn default() -> Self {
        Self {
            reset_delay: DEFAULT_RESET_DELAY,
            success_label: DEFAULT_SUCCESS_LABEL.to_string(),
            failure_message: DEFAULT_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Pending reversion. `generation` bumps on every successful copy so a timer
/// that lost the race to a newer copy never clears the newer flash.
#[derive(Debug, Default)]
struct ResetTimer {
    generation: u64,
    handle: Option<AbortHandle>,
}

#[derive(Debug)]
struct CopyState {
    copied: watch::Sender<bool>,
    reset: Mutex<ResetTimer>,
}

impl CopyState {
    fn new() -> Self {
        let (copied, _) = watch::channel(false);
        Self {
            copied,
            reset: Mutex::new(ResetTimer::default()),
        }
    }

    fn timer(&self) -> MutexGuard<'_, ResetTimer> {
        self.reset.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Only wakes subscribers when the value actually changes
    fn set(&self, value: bool) {
        self.copied.send_if_modified(|current| {
            let changed = *current != value;
            *current = value;
            changed
        });
    }

    fn revert(&self, generation: u64) {
        let mut timer = self.timer();
        if timer.generation != generation {
            return;
        }
        timer.handle = None;
        self.set(false);
        tracing::trace!("Copy indicator reset");
    }
}

/// Copies text to the clipboard and tracks a transient "copied" flag
///
/// Never fails from the caller's point of view: every clipboard error becomes
/// a `false` return plus a failure notification.
pub struct CopyUnit<C, N> {
    clipboard: C,
    notifier: N,
    settings: CopySettings,
    state: Arc<CopyState>,
}

impl<C: Clipboard, N: Notifier> CopyUnit<C, N> {
    pub fn new(clipboard: C, notifier: N) -> Self {
        Self::with_settings(clipboard, notifier, CopySettings::default())
    }

    pub fn with_settings(clipboard: C, notifier: N, settings: CopySettings) -> Self {
        Self {
            clipboard,
            notifier,
            settings,
            state: Arc::new(CopyState::new()),
        }
    }

    /// Write `text` to the clipboard and notify the user.
    ///
    /// On success the success notification carries `label` (or the default
    /// label when `None` or empty), `copied` becomes `true` and the reset
    /// timer is re-armed. On failure a single failure notification is sent
    /// and `copied` is left untouched.
    pub async fn copy(&self, text: &str, label: Option<&str>) -> bool {
        match self.clipboard.write_text(text).await {
            Ok(()) => {
                self.flash();
                let label = label
                    .filter(|l| !l.is_empty())
                    .unwrap_or(self.settings.success_label.as_str());
                tracing::debug!(
                    backend = self.clipboard.name(),
                    chars = text.chars().count(),
                    "Copied to clipboard"
                );
                self.notifier.notify_success(label);
                true
            }
            Err(e) => {
                tracing::warn!(backend = self.clipboard.name(), "Clipboard write failed: {}", e);
                self.notifier.notify_failure(&self.settings.failure_message);
                false
            }
        }
    }

    /// Current value of the copied flag
    pub fn copied(&self) -> bool {
        *self.state.copied.borrow()
    }

    /// Watch the copied flag; receivers wake on every change
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.state.copied.subscribe()
    }

    /// Name of the clipboard backend in use
    pub fn backend_name(&self) -> &'static str {
        self.clipboard.name()
    }

    pub fn settings(&self) -> &CopySettings {
        &self.settings
    }

    /// Set the flag and (re)arm the reset timer
    fn flash(&self) {
        let mut timer = self.state.timer();
        timer.generation = timer.generation.wrapping_add(1);
        let generation = timer.generation;

        self.state.set(true);

        if let Some(previous) = timer.handle.take() {
            previous.abort();
        }

        // Deadline is fixed now, not when the task first gets polled
        let deadline = Instant::now() + self.settings.reset_delay;
        let state: Weak<CopyState> = Arc::downgrade(&self.state);
        let task = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if let Some(state) = state.upgrade() {
                state.revert(generation);
            }
        });
        timer.handle = Some(task.abort_handle());
    }
}

impl<C, N> Drop for CopyUnit<C, N> {
    fn drop(&mut self) {
        if let Some(handle) = self.state.timer().handle.take() {
            handle.abort();
        }
    }
}

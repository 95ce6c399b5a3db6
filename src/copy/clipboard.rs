//! Clipboard backends for writing text to the system clipboard
//!
//! Two backends are available:
//! - `System`: uses `arboard` for cross-platform support (Windows, macOS, Linux).
//!   The clipboard is created fresh for each write.
//! - `Osc52`: emits an OSC 52 escape sequence so the *terminal* sets the
//!   clipboard. Works over SSH where no display server is reachable.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Largest base64 payload most terminals accept in a single OSC 52 sequence
const OSC52_MAX_ENCODED: usize = 100_000;

/// Reasons a clipboard write can fail
///
/// The copy unit collapses all of these into one failure outcome; the
/// variant only ends up in the logs.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    /// No clipboard could be reached (headless Linux, no display server)
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    /// The platform refused access
    #[error("clipboard permission denied: {0}")]
    PermissionDenied(String),

    /// The clipboard was reached but the write did not go through
    #[error("clipboard write failed: {0}")]
    WriteFailed(String),
}

/// Host clipboard capability: an asynchronous "write text" operation
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Place `text` on the clipboard
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;

    /// Short name for the status bar and logs
    fn name(&self) -> &'static str;
}

#[async_trait]
impl<T: Clipboard + ?Sized> Clipboard for Box<T> {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        (**self).write_text(text).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

#[async_trait]
impl<T: Clipboard + ?Sized> Clipboard for Arc<T> {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        (**self).write_text(text).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Backend selection
// ─────────────────────────────────────────────────────────────────────────────

/// Which clipboard implementation to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum ClipboardBackend {
    /// Native clipboard through arboard (default)
    #[default]
    System,
    /// Terminal clipboard through OSC 52
    Osc52,
}

/// A backend name that is neither "system" nor "osc52"
#[derive(Debug, thiserror::Error)]
#[error("unknown clipboard backend {0:?} (expected \"system\" or \"osc52\")")]
pub struct UnknownBackend(String);

impl FromStr for ClipboardBackend {
    type Err = UnknownBackend;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "system" => Ok(Self::System),
            "osc52" | "osc-52" | "terminal" => Ok(Self::Osc52),
            _ => Err(UnknownBackend(s.to_string())),
        }
    }
}

impl TryFrom<String> for ClipboardBackend {
    type Error = UnknownBackend;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl ClipboardBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Osc52 => "osc52",
        }
    }
}

/// Build the clipboard for a configured backend
pub fn clipboard_from_backend(backend: ClipboardBackend) -> Box<dyn Clipboard> {
    match backend {
        ClipboardBackend::System => Box::new(SystemClipboard::default()),
        ClipboardBackend::Osc52 => Box::new(Osc52Clipboard::stdout()),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// System clipboard (arboard)
// ─────────────────────────────────────────────────────────────────────────────

/// Native clipboard via `arboard`
///
/// arboard is synchronous and may block on X11/Wayland round-trips, so each
/// write runs on the blocking pool.
///
/// On Linux the copied text lives only as long as some process serves the
/// selection. A long-running TUI does that itself; a process about to exit
/// should use [`SystemClipboard::waiting`] and then
/// [`SystemClipboard::wait_for_handoff`] so the text outlives it.
#[derive(Debug, Default)]
pub struct SystemClipboard {
    /// Keep serving each write until another owner takes the selection
    wait: bool,
    serving: Mutex<Option<JoinHandle<()>>>,
}

impl SystemClipboard {
    /// A clipboard that keeps serving written text until it is replaced
    /// (Linux only; elsewhere the OS keeps the text and this is a plain write)
    pub fn waiting() -> Self {
        Self {
            wait: true,
            serving: Mutex::new(None),
        }
    }

    fn serving(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.serving.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether a write is still being served to other applications
    pub fn is_serving(&self) -> bool {
        self.serving().as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Block until a clipboard manager or another copy takes over the text
    pub async fn wait_for_handoff(&self) {
        let handle = self.serving().take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                tracing::warn!("Clipboard server task failed: {}", e);
            }
        }
    }
}

#[async_trait]
impl Clipboard for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let text = text.to_string();
        let wait = self.wait;
        let (written_tx, written) = oneshot::channel();

        let task = tokio::task::spawn_blocking(move || {
            let mut clipboard = match arboard::Clipboard::new() {
                Ok(clipboard) => clipboard,
                Err(e) => {
                    let _ = written_tx.send(Err(classify_open_error(e)));
                    return;
                }
            };
            if let Err(e) = clipboard.set_text(text.as_str()) {
                let _ = written_tx.send(Err(classify_write_error(e)));
                return;
            }
            let _ = written_tx.send(Ok(()));

            if wait {
                serve_until_replaced(&mut clipboard, text);
            }
        });

        let result = written.await.map_err(|_| {
            ClipboardError::WriteFailed("clipboard task ended before writing".to_string())
        })?;

        if result.is_ok() && wait && cfg!(target_os = "linux") {
            // A previous write still being served is superseded by this one
            if let Some(previous) = self.serving().replace(task) {
                previous.abort();
            }
        }
        result
    }

    fn name(&self) -> &'static str {
        "system"
    }
}

/// Re-own the selection and serve it until another owner replaces it
#[cfg(target_os = "linux")]
fn serve_until_replaced(clipboard: &mut arboard::Clipboard, text: String) {
    use arboard::SetExtLinux;

    if let Err(e) = clipboard.set().wait().text(text) {
        tracing::debug!("Stopped serving clipboard: {}", e);
    }
}

#[cfg(not(target_os = "linux"))]
fn serve_until_replaced(_clipboard: &mut arboard::Clipboard, _text: String) {}

/// Failing to open the clipboard means there is nothing to talk to
fn classify_open_error(err: arboard::Error) -> ClipboardError {
    match classify_write_error(err) {
        ClipboardError::WriteFailed(msg) => ClipboardError::Unavailable(msg),
        other => other,
    }
}

fn classify_write_error(err: arboard::Error) -> ClipboardError {
    match err {
        arboard::Error::ClipboardNotSupported => {
            ClipboardError::Unavailable("clipboard not supported on this platform".to_string())
        }
        arboard::Error::ClipboardOccupied => {
            ClipboardError::WriteFailed("clipboard is occupied by another process".to_string())
        }
        other => {
            let msg = other.to_string();
            let lower = msg.to_lowercase();
            if lower.contains("permission") || lower.contains("denied") {
                ClipboardError::PermissionDenied(msg)
            } else {
                ClipboardError::WriteFailed(msg)
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// OSC 52 clipboard
// ─────────────────────────────────────────────────────────────────────────────

/// Build the OSC 52 "set clipboard" sequence for `text`
///
/// Returns `None` when the encoded payload is too large for terminals to accept.
pub fn osc52_sequence(text: &str) -> Option<String> {
    let encoded = STANDARD.encode(text.as_bytes());
    if encoded.len() > OSC52_MAX_ENCODED {
        return None;
    }
    Some(format!("\x1b]52;c;{}\x07", encoded))
}

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// Clipboard that asks the terminal to set the selection via OSC 52
pub struct Osc52Clipboard {
    out: SharedWriter,
}

impl Osc52Clipboard {
    /// Write sequences to the process stdout (the terminal)
    pub fn stdout() -> Self {
        Self::with_writer(Box::new(std::io::stdout()))
    }

    /// Write sequences to an arbitrary sink
    pub fn with_writer(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Arc::new(Mutex::new(out)),
        }
    }
}

#[async_trait]
impl Clipboard for Osc52Clipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let sequence = osc52_sequence(text).ok_or_else(|| {
            ClipboardError::WriteFailed(format!(
                "{} bytes is too large for an OSC 52 sequence",
                text.len()
            ))
        })?;

        let mut out = self
            .out
            .lock()
            .map_err(|_| ClipboardError::WriteFailed("terminal writer poisoned".to_string()))?;
        out.write_all(sequence.as_bytes())
            .and_then(|_| out.flush())
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::PermissionDenied => {
                    ClipboardError::PermissionDenied(e.to_string())
                }
                _ => ClipboardError::WriteFailed(e.to_string()),
            })
    }

    fn name(&self) -> &'static str {
        "osc52"
    }
}

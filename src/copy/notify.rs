//! Notification channel for copy outcomes
//!
//! The copy unit never talks to a toast surface directly. It hands a
//! [`Notification`] to whatever [`Notifier`] it was built with: the TUI wires
//! in a [`ChannelNotifier`], the one-shot `copy` command a [`StderrNotifier`].

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Whether a notification reports success or failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Failure,
}

/// A transient, user-facing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
            at: Utc::now(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Failure,
            message: message.into(),
            at: Utc::now(),
        }
    }

    /// Get a toast message for this notification
    pub fn toast_message(&self) -> String {
        match self.kind {
            NotificationKind::Success => format!("✓ {}", self.message),
            NotificationKind::Failure => format!("✗ {}", self.message),
        }
    }
}

/// Anything that can surface a notification to the user
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);

    fn notify_success(&self, message: &str) {
        self.notify(Notification::success(message));
    }

    fn notify_failure(&self, message: &str) {
        self.notify(Notification::failure(message));
    }
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}

/// Forwards notifications to the TUI event loop, which renders them as toasts
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    /// Create a notifier and the receiver the event loop drains
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        // Receiver gone means the UI is shutting down; nobody is left to tell
        if let Err(e) = self.sender.send(notification) {
            tracing::debug!("Dropped notification, receiver closed: {}", e.0.message);
        }
    }
}

/// Prints notifications on stderr (one-shot CLI mode)
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, notification: Notification) {
        eprintln!("{}", notification.toast_message());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_message_prefixes() {
        assert_eq!(
            Notification::success("Address copied").toast_message(),
            "✓ Address copied"
        );
        assert_eq!(
            Notification::failure("Failed to copy").toast_message(),
            "✗ Failed to copy"
        );
    }

    #[test]
    fn test_channel_notifier_delivers_in_order() {
        let (notifier, mut rx) = ChannelNotifier::channel();
        notifier.notify_success("one");
        notifier.notify_failure("two");

        let first = rx.try_recv().unwrap();
        assert_eq!(first.kind, NotificationKind::Success);
        assert_eq!(first.message, "one");

        let second = rx.try_recv().unwrap();
        assert_eq!(second.kind, NotificationKind::Failure);
        assert_eq!(second.message, "two");
    }

    #[test]
    fn test_channel_notifier_survives_closed_receiver() {
        let (notifier, rx) = ChannelNotifier::channel();
        drop(rx);
        notifier.notify_success("nobody listening");
    }
}

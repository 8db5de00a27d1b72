//! User-facing notifications (toasts).

use crate::favorites::Undo;

/// One notification for the user.
#[derive(Debug)]
pub enum Notification {
    Success(String),
    /// Informational message, optionally carrying an undo action.
    Info { message: String, undo: Option<Undo> },
    Error(String),
}

impl Notification {
    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Error(message) => message,
            Self::Info { message, .. } => message,
        }
    }
}

/// Where notifications are delivered. Implementations must not block.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log. Undo actions are dropped.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match &notification {
            Notification::Error(message) => tracing::warn!(%message, "Notification"),
            other => tracing::info!(message = %other.message(), "Notification"),
        }
    }
}

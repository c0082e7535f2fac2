//! User-visible failure notices.

use notify_rust::Notification;
use tracing::{error, warn};

/// Sink for blocking, user-visible failure notices.
///
/// The controller reports IPC failures through this; tests substitute a
/// capturing implementation.
pub trait Alert: Send + Sync {
    /// Surface `message` to the user.
    fn alert(&self, message: &str);
}

/// Production [`Alert`] backed by desktop notifications.
pub struct DesktopNotifier {
    enabled: bool,
}

impl DesktopNotifier {
    /// Create a notifier; `enabled` comes from the notifications config.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Alert for DesktopNotifier {
    /// Log the notice and, when enabled, raise a desktop notification.
    ///
    /// Notification failures are logged and swallowed: a failed alert must
    /// never corrupt controller state.
    fn alert(&self, message: &str) {
        error!("{}", message);

        if !self.enabled {
            return;
        }

        if let Err(e) = Notification::new().summary("VoxNote").body(message).show() {
            warn!(error = ?e, "Desktop notification failed");
        }
    }
}

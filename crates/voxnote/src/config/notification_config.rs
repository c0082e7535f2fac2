use crate::config::default_notifications_enabled;

use serde::{Deserialize, Serialize};

/// Desktop notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Whether IPC failures raise a desktop notification in addition to
    /// the diagnostic log.
    #[serde(default = "default_notifications_enabled")]
    pub enabled: bool,
}

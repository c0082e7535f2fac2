mod backend_config;
#[allow(clippy::module_inception)]
mod config;
mod notification_config;

pub(crate) use {
    backend_config::BackendConfig, config::Config, notification_config::NotificationConfig,
};

pub(crate) const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
pub(crate) const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub(crate) const DEFAULT_NOTIFICATIONS_ENABLED: bool = true;

pub(crate) fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

pub(crate) fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

pub(crate) fn default_notifications_enabled() -> bool {
    DEFAULT_NOTIFICATIONS_ENABLED
}

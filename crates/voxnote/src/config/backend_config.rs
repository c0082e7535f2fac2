use crate::config::{default_connect_timeout_secs, default_request_timeout_secs};

use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

/// Recording backend connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Override for the backend socket path. When unset, the platform
    /// default from voxnote-core is used.
    #[serde(default)]
    pub socket_path: Option<PathBuf>,
    /// Timeout for establishing the backend connection, in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Timeout for one request/response exchange, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl BackendConfig {
    /// Socket path to connect to, applying the platform default.
    pub fn socket_path(&self) -> PathBuf {
        self.socket_path
            .clone()
            .unwrap_or_else(voxnote_core::default_socket_path)
    }

    /// Connect timeout as a [`Duration`].
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

use crate::config::default_link_enabled;

use serde::{Deserialize, Serialize};

/// Persisted device-link preference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceLinkConfig {
    /// Whether the remote peer may control playback.
    #[serde(default = "default_link_enabled")]
    pub enabled: bool,
}

impl Default for DeviceLinkConfig {
    fn default() -> Self {
        Self {
            enabled: default_link_enabled(),
        }
    }
}

use crate::config::default_duration_ms;

use serde::{Deserialize, Serialize};

/// Console player configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Length given to every video opened in the console player.
    #[serde(default = "default_duration_ms")]
    pub default_duration_ms: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: default_duration_ms(),
        }
    }
}

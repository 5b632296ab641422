#[allow(clippy::module_inception)]
mod config;
mod device_link_config;
mod player_config;

pub(crate) use {
    config::Config, device_link_config::DeviceLinkConfig, player_config::PlayerConfig,
};

pub(crate) const DEFAULT_LINK_ENABLED: bool = false;
pub(crate) const DEFAULT_DURATION_MS: u64 = 600_000;

pub(crate) fn default_link_enabled() -> bool {
    DEFAULT_LINK_ENABLED
}

pub(crate) fn default_duration_ms() -> u64 {
    DEFAULT_DURATION_MS
}

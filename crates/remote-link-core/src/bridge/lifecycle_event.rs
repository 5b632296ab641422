use crate::MediaItem;

/// Host application events consumed by [`SessionBridge::run`](crate::SessionBridge::run).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The host finished initialising.
    Initialized,
    /// The player view came back to the foreground.
    Resumed,
    /// A media item finished loading in the player.
    MediaLoaded(MediaItem),
    /// Stop the bridge.
    Shutdown,
}

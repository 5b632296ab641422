//! Remote-link Core Library
//!
//! Bridges a remote command channel to a local media player. While the
//! device link is enabled, [`SessionBridge`] listens for remote commands
//! (open video, seek, play, pause), applies them to the player and reports
//! the resulting playback state back upstream.
//!
//! # Example
//!
//! ```no_run
//! use remote_link_core::{LifecycleEvent, LinkState, SessionBridge};
//! # use remote_link_core::{MessageSink, PlaybackController, RemoteChannel, VideoOpener};
//! # use std::sync::Arc;
//! # async fn wire(
//! #     channel: Arc<dyn RemoteChannel>,
//! #     player: Arc<dyn PlaybackController>,
//! #     opener: Arc<dyn VideoOpener>,
//! #     messages: Arc<dyn MessageSink>,
//! # ) {
//! let link = LinkState::new(true);
//! let bridge = SessionBridge::new(&link, channel, player, opener, messages);
//!
//! let (lifecycle_tx, lifecycle_rx) = tokio::sync::mpsc::channel(32);
//! tokio::spawn(bridge.run(lifecycle_rx));
//!
//! let _ = lifecycle_tx.send(LifecycleEvent::Resumed).await;
//! # }
//! ```

mod bridge;
mod channel;
mod command;
mod error;
mod link_state;
mod playback;

pub use {
    bridge::{
        BridgeEvent, LifecycleEvent, ReportKind, SessionBridge, SubscriptionState,
    },
    channel::{CommandStream, RemoteChannel, Report},
    command::Command,
    error::{BridgeError, Result as CoreResult},
    link_state::{LinkListener, LinkState},
    playback::{MediaItem, MessageSink, PlaybackController, PlaybackSnapshot, VideoOpener},
};

#[cfg(test)]
mod tests;

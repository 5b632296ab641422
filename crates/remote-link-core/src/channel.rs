use crate::{Command, CoreResult, PlaybackSnapshot};

use futures::future::BoxFuture;
use futures::stream::BoxStream;

/// Lazy stream of inbound commands, in channel arrival order.
///
/// An `Err` item ends the subscription: the bridge stops polling and waits
/// for the next reconcile trigger.
pub type CommandStream = BoxStream<'static, CoreResult<Command>>;

/// Fire-and-forget outbound report. Failures are handled by the channel.
pub type Report = BoxFuture<'static, ()>;

/// Bidirectional command/state channel to the remote peer.
///
/// Nothing happens until the returned stream is polled or the returned
/// report is spawned. Dropping either releases its channel resources.
pub trait RemoteChannel: Send + Sync {
    /// Open a new inbound command subscription.
    fn subscribe_commands(&self) -> CommandStream;

    /// Report that a video started playing.
    fn report_started(&self, video_id: &str, position_ms: u64, duration_ms: u64) -> Report;

    /// Report a playback state transition.
    fn report_state_changed(&self, snapshot: PlaybackSnapshot) -> Report;
}

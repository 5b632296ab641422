//! Line-oriented stand-in for the backend command service.
//!
//! Remote payloads typed on stdin are broadcast to every open subscription.
//! Outbound reports are printed to stdout as JSON lines.

use remote_link_core::{
    BridgeError, Command, CommandStream, PlaybackSnapshot, RemoteChannel, Report,
};

use std::{io::Write, panic::Location};

use error_location::ErrorLocation;
use futures::{FutureExt, StreamExt, stream};
use serde::Serialize;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{info, warn};

/// Report line written to stdout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundReport {
    /// A video started playing.
    Started {
        /// Identifier of the video.
        video_id: String,
        /// Position when playback started.
        position_ms: u64,
        /// Length of the video.
        duration_ms: u64,
    },
    /// Playback state changed.
    StateChanged {
        /// Current position.
        position_ms: u64,
        /// Length of the video.
        duration_ms: u64,
        /// Whether the player is playing.
        is_playing: bool,
    },
}

impl OutboundReport {
    /// Encode as a single JSON line.
    pub(crate) fn to_line(&self) -> Option<String> {
        match serde_json::to_string(self) {
            Ok(line) => Some(line),
            Err(e) => {
                warn!(error = ?e, "Failed to encode report");
                None
            }
        }
    }
}

/// [`RemoteChannel`] fed by console lines.
pub struct ConsoleChannel {
    inbound: broadcast::Sender<String>,
}

impl ConsoleChannel {
    /// Create a channel that decodes payloads sent on `inbound`.
    pub fn new(inbound: broadcast::Sender<String>) -> Self {
        Self { inbound }
    }
}

impl RemoteChannel for ConsoleChannel {
    fn subscribe_commands(&self) -> CommandStream {
        let rx = self.inbound.subscribe();

        stream::unfold(rx, |mut rx| async move {
            let received = rx.recv().await;
            match received {
                Ok(payload) => Some((Command::from_json(&payload), rx)),
                Err(RecvError::Lagged(skipped)) => Some((Err(lagged(skipped)), rx)),
                Err(RecvError::Closed) => None,
            }
        })
        .boxed()
    }

    fn report_started(&self, video_id: &str, position_ms: u64, duration_ms: u64) -> Report {
        emit(OutboundReport::Started {
            video_id: video_id.to_string(),
            position_ms,
            duration_ms,
        })
    }

    fn report_state_changed(&self, snapshot: PlaybackSnapshot) -> Report {
        emit(OutboundReport::StateChanged {
            position_ms: snapshot.position_ms,
            duration_ms: snapshot.duration_ms,
            is_playing: snapshot.is_playing,
        })
    }
}

fn emit(report: OutboundReport) -> Report {
    async move {
        let Some(line) = report.to_line() else {
            return;
        };

        info!(report = %line, "Reporting to remote");

        let mut stdout = std::io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", line) {
            warn!(error = ?e, "Failed to write report");
        }
    }
    .boxed()
}

#[track_caller]
fn lagged(skipped: u64) -> BridgeError {
    BridgeError::ChannelFailed {
        reason: format!("Subscriber lagged, {} payloads lost", skipped),
        location: ErrorLocation::from(Location::caller()),
    }
}

use crate::{BridgeError, CoreResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// A discrete instruction received from the remote peer.
///
/// Decoded from JSON objects tagged by `"type"`. Kinds this build does not
/// know decode to [`Command::Unknown`] and are ignored by the bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Open the given video in the player UI.
    OpenVideo {
        /// Identifier of the video to open.
        video_id: String,
    },
    /// Move the playhead.
    Seek {
        /// Target position in milliseconds.
        position_ms: u64,
    },
    /// Resume playback.
    Play,
    /// Pause playback.
    Pause,
    /// A command kind introduced after this build.
    #[serde(other)]
    Unknown,
}

impl Command {
    /// Decode a command from its JSON representation.
    #[track_caller]
    pub fn from_json(payload: &str) -> CoreResult<Self> {
        serde_json::from_str(payload).map_err(|e| BridgeError::InvalidCommand {
            reason: format!("Failed to decode command: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Short name of the command kind, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Command::OpenVideo { .. } => "open_video",
            Command::Seek { .. } => "seek",
            Command::Play => "play",
            Command::Pause => "pause",
            Command::Unknown => "unknown",
        }
    }
}

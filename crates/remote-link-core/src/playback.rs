//! Local playback collaborators.
//!
//! The player, the video-open entry point and the user-facing message sink
//! belong to the host application. The bridge only sees these traits.

/// Point-in-time view of the player, read on demand for a single report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackSnapshot {
    /// Current playhead position in milliseconds.
    pub position_ms: u64,
    /// Length of the loaded media in milliseconds.
    pub duration_ms: u64,
    /// Whether the player is currently playing.
    pub is_playing: bool,
}

/// Media item that finished loading in the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    /// Identifier reported upstream when playback starts.
    pub video_id: String,
}

impl MediaItem {
    /// Create an item for the given video identifier.
    pub fn new(video_id: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
        }
    }
}

/// Local media player.
///
/// Called only from the bridge's dispatch context, never concurrently.
pub trait PlaybackController: Send + Sync {
    /// Current playhead position in milliseconds.
    fn position_ms(&self) -> u64;

    /// Length of the loaded media in milliseconds.
    fn duration_ms(&self) -> u64;

    /// Whether the player is currently playing.
    fn is_playing(&self) -> bool;

    /// Move the playhead.
    fn set_position_ms(&self, position_ms: u64);

    /// Start or pause playback.
    fn set_playing(&self, playing: bool);

    /// Read position, duration and play flag together.
    fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            position_ms: self.position_ms(),
            duration_ms: self.duration_ms(),
            is_playing: self.is_playing(),
        }
    }
}

/// Entry point that opens a video in the playback UI.
pub trait VideoOpener: Send + Sync {
    /// Open the video. Fire-and-forget.
    fn open_video(&self, video_id: &str);
}

/// User-facing message sink (toast, status line, stderr).
pub trait MessageSink: Send + Sync {
    /// Display a message to the user.
    fn show_message(&self, message: &str);
}

//! In-memory player driven from the console.

use remote_link_core::{LifecycleEvent, MediaItem, PlaybackController, VideoOpener};

use std::sync::{Mutex, MutexGuard};

use tokio::sync::mpsc;
use tracing::{error, info, warn};

#[derive(Debug, Default)]
struct PlayerState {
    video_id: Option<String>,
    position_ms: u64,
    duration_ms: u64,
    playing: bool,
}

/// Player with no real media: it only tracks what a real player would report.
///
/// Opening a video posts [`LifecycleEvent::MediaLoaded`] to the bridge, the
/// same way a real player announces a finished load.
pub struct ConsolePlayer {
    state: Mutex<PlayerState>,
    default_duration_ms: u64,
    lifecycle_tx: mpsc::Sender<LifecycleEvent>,
}

impl ConsolePlayer {
    /// Create an idle player.
    pub fn new(default_duration_ms: u64, lifecycle_tx: mpsc::Sender<LifecycleEvent>) -> Self {
        Self {
            state: Mutex::new(PlayerState::default()),
            default_duration_ms,
            lifecycle_tx,
        }
    }

    /// Identifier of the loaded video, if any.
    pub fn video_id(&self) -> Option<String> {
        self.state().video_id.clone()
    }

    fn state(&self) -> MutexGuard<'_, PlayerState> {
        // A poisoned lock still holds a consistent PlayerState.
        self.state.lock().unwrap_or_else(|e| {
            error!("Player state lock poisoned, recovering: {}", e);
            e.into_inner()
        })
    }
}

impl PlaybackController for ConsolePlayer {
    fn position_ms(&self) -> u64 {
        self.state().position_ms
    }

    fn duration_ms(&self) -> u64 {
        self.state().duration_ms
    }

    fn is_playing(&self) -> bool {
        self.state().playing
    }

    fn set_position_ms(&self, position_ms: u64) {
        self.state().position_ms = position_ms;
    }

    fn set_playing(&self, playing: bool) {
        self.state().playing = playing;
    }
}

impl VideoOpener for ConsolePlayer {
    fn open_video(&self, video_id: &str) {
        {
            let mut state = self.state();
            state.video_id = Some(video_id.to_string());
            state.position_ms = 0;
            state.duration_ms = self.default_duration_ms;
            state.playing = true;
        }

        info!(video_id = %video_id, "Video opened");

        if let Err(e) = self
            .lifecycle_tx
            .try_send(LifecycleEvent::MediaLoaded(MediaItem::new(video_id)))
        {
            warn!(video_id = %video_id, error = ?e, "Failed to announce loaded media");
        }
    }
}

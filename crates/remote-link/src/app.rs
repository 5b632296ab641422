use crate::{AppError, AppResult, ConsoleCommand, ConsoleMessages, ConsolePlayer, config::Config};

use remote_link_core::{LifecycleEvent, LinkState, MessageSink, PlaybackController, VideoOpener};

use std::{io::BufRead, panic::Location, path::PathBuf, sync::Arc, time::Duration};

use error_location::ErrorLocation;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info, instrument, warn};

/// Console host state.
///
/// Owns the device-link preference and feeds the bridge with lifecycle
/// events and remote payloads read from stdin.
pub struct App {
    pub(crate) config: Config,
    pub(crate) config_path: PathBuf,
    pub(crate) link: LinkState,
    pub(crate) player: Arc<ConsolePlayer>,
    pub(crate) messages: Arc<ConsoleMessages>,
    pub(crate) lifecycle_tx: mpsc::Sender<LifecycleEvent>,
    pub(crate) remote_tx: broadcast::Sender<String>,
}

impl App {
    /// Run the console loop until `:quit` or end of input.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("Remote-link starting");

        // Stdin forwarding via single persistent blocking task.
        //
        // Shutdown: when line_rx is dropped (main loop breaks),
        // line_tx.blocking_send() fails, breaking the blocking loop.
        let (line_tx, mut line_rx) = mpsc::channel(32);
        let stdin_handle = tokio::task::spawn_blocking(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else {
                    break;
                };
                if line_tx.blocking_send(line).is_err() {
                    break;
                }
            }
        });

        self.send_lifecycle(LifecycleEvent::Initialized).await?;

        while let Some(line) = line_rx.recv().await {
            match self.handle_line(&line).await {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    warn!(error = ?e, "Failed to handle console line");
                    self.messages.show_message(&e.to_string());
                }
            }
        }

        drop(line_rx);

        self.send_lifecycle(LifecycleEvent::Shutdown).await?;

        match tokio::time::timeout(Duration::from_secs(1), stdin_handle).await {
            Ok(Ok(())) => debug!("Stdin forwarder stopped cleanly"),
            Ok(Err(e)) => error!(error = ?e, "Stdin forwarder task panicked"),
            Err(_) => debug!(
                "Stdin forwarder did not stop within timeout, \
                     will be cleaned up on exit"
            ),
        }

        info!("Remote-link shut down successfully");

        Ok(())
    }

    /// Handle one console line. Returns `false` when the host should stop.
    pub(crate) async fn handle_line(&mut self, line: &str) -> AppResult<bool> {
        let line = line.trim();

        if line.is_empty() {
            return Ok(true);
        }

        if line.starts_with(':') {
            let command = ConsoleCommand::parse(line)?;
            return self.handle_console_command(command).await;
        }

        if self.remote_tx.send(line.to_string()).is_err() {
            debug!("No remote subscription, payload dropped");
        }

        Ok(true)
    }

    #[instrument(skip(self))]
    async fn handle_console_command(&mut self, command: ConsoleCommand) -> AppResult<bool> {
        match command {
            ConsoleCommand::Link(enabled) => {
                if self.link.set_enabled(enabled) {
                    self.config.device_link.enabled = enabled;
                    self.config.save_to(&self.config_path)?;
                    info!(enabled, "Device link preference updated");
                }
            }
            ConsoleCommand::Load(video_id) => {
                self.player.open_video(&video_id);
            }
            ConsoleCommand::Resume => {
                self.send_lifecycle(LifecycleEvent::Resumed).await?;
            }
            ConsoleCommand::Status => {
                self.messages.show_message(&format!(
                    "link={} video={} position_ms={} duration_ms={} playing={}",
                    if self.link.is_enabled() { "on" } else { "off" },
                    self.player.video_id().as_deref().unwrap_or("-"),
                    self.player.position_ms(),
                    self.player.duration_ms(),
                    self.player.is_playing(),
                ));
            }
            ConsoleCommand::Quit => {
                info!("Quit requested");
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Send a lifecycle event to the bridge.
    ///
    /// The location is captured here, before the returned future runs, so a
    /// failed send points at the caller.
    #[track_caller]
    pub(crate) fn send_lifecycle(
        &self,
        event: LifecycleEvent,
    ) -> impl Future<Output = AppResult<()>> + '_ {
        let location = ErrorLocation::from(Location::caller());

        async move {
            self.lifecycle_tx
                .send(event)
                .await
                .map_err(|e| AppError::ChannelSendFailed {
                    message: format!("Failed to send lifecycle event: {}", e),
                    location,
                })
        }
    }
}

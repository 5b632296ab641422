//! Link-state driven remote control session.
//!
//! Owns the inbound command subscription and the two outbound report slots.
//! All public methods run on the dispatch context (the task that owns the
//! bridge); the subscription worker and the reports run in the background.

use crate::{
    BridgeEvent, Command, LifecycleEvent, LinkListener, LinkState, MediaItem, MessageSink,
    PlaybackController, PlaybackSnapshot, RemoteChannel, VideoOpener,
    bridge::{EVENT_CHANNEL_CAPACITY, subscription::CommandSubscription, task_slot::TaskSlot},
};

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

/// Inbound subscription state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionState {
    /// No subscription. Initial state.
    Unsubscribed,
    /// Listening for remote commands.
    Listening {
        /// Id of the active subscription.
        subscription: Uuid,
    },
}

/// Kind of outbound report. At most one of each kind is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// "Started playing" report sent when media loads.
    Started,
    /// Playback state report sent after a remote command.
    StateChanged,
}

/// Remote control bridge between a [`RemoteChannel`] and the local player.
pub struct SessionBridge {
    link: LinkListener,
    channel: Arc<dyn RemoteChannel>,
    controller: Arc<dyn PlaybackController>,
    opener: Arc<dyn VideoOpener>,
    messages: Arc<dyn MessageSink>,
    subscription: Option<CommandSubscription>,
    start_report: TaskSlot,
    state_report: TaskSlot,
    event_tx: mpsc::Sender<BridgeEvent>,
    event_rx: mpsc::Receiver<BridgeEvent>,
}

impl SessionBridge {
    /// Create a bridge and register it as a listener on `link`.
    ///
    /// Nothing is subscribed until the first reconcile trigger.
    pub fn new(
        link: &LinkState,
        channel: Arc<dyn RemoteChannel>,
        controller: Arc<dyn PlaybackController>,
        opener: Arc<dyn VideoOpener>,
        messages: Arc<dyn MessageSink>,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            link: link.subscribe(),
            channel,
            controller,
            opener,
            messages,
            subscription: None,
            start_report: TaskSlot::default(),
            state_report: TaskSlot::default(),
            event_tx,
            event_rx,
        }
    }

    /// Serve worker events, link changes and lifecycle events until shutdown.
    ///
    /// Reconciles once on entry. Returns when [`LifecycleEvent::Shutdown`]
    /// arrives or `lifecycle_rx` closes, after cancelling all background work.
    #[instrument(skip_all)]
    pub async fn run(mut self, mut lifecycle_rx: mpsc::Receiver<LifecycleEvent>) {
        info!("Remote control bridge starting");

        self.reconcile();

        let mut link_open = true;

        loop {
            tokio::select! {
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }

                changed = self.link.changed(), if link_open => {
                    match changed {
                        Some(enabled) => self.apply_link_state(enabled),
                        None => {
                            debug!("Link state store dropped, no further link changes");
                            link_open = false;
                        }
                    }
                }

                lifecycle = lifecycle_rx.recv() => {
                    match lifecycle {
                        Some(LifecycleEvent::Initialized) => self.on_initialized(),
                        Some(LifecycleEvent::Resumed) => self.on_resumed(),
                        Some(LifecycleEvent::MediaLoaded(item)) => self.on_media_loaded(&item),
                        Some(LifecycleEvent::Shutdown) => {
                            info!("Shutdown requested");
                            break;
                        }
                        None => {
                            info!("Lifecycle channel closed, shutting down");
                            break;
                        }
                    }
                }
            }
        }

        self.shutdown();
        info!("Remote control bridge stopped");
    }

    /// The link flag changed.
    pub fn on_link_state_changed(&mut self) {
        self.reconcile();
    }

    /// The player view came back to the foreground.
    pub fn on_resumed(&mut self) {
        self.reconcile();
    }

    /// The host finished initialising.
    pub fn on_initialized(&mut self) {
        self.reconcile();
    }

    /// Align the subscription with the link flag.
    ///
    /// Enabled: make sure exactly one subscription is listening. Disabled:
    /// cancel the subscription and both in-flight reports.
    #[instrument(skip(self))]
    pub fn reconcile(&mut self) {
        if self.link.is_enabled() {
            self.start_listening();
        } else {
            self.stop_listening();
        }
    }

    /// Apply one delivered link transition.
    ///
    /// Unlike [`reconcile`](Self::reconcile), this acts on the transmitted
    /// value, so a quick off/on pair still cancels the old subscription.
    #[instrument(skip(self))]
    pub fn apply_link_state(&mut self, enabled: bool) {
        if enabled {
            self.start_listening();
        } else {
            self.stop_listening();
        }
    }

    /// A media item finished loading. Reports it upstream while linked.
    #[instrument(skip(self), fields(video_id = %item.video_id))]
    pub fn on_media_loaded(&mut self, item: &MediaItem) {
        if !self.link.is_enabled() {
            return;
        }

        let position_ms = self.controller.position_ms();
        let duration_ms = self.controller.duration_ms();
        let report = self
            .channel
            .report_started(&item.video_id, position_ms, duration_ms);

        if self.start_report.replace(tokio::spawn(report)) {
            debug!("Superseded in-flight start report");
        }

        debug!(position_ms, duration_ms, "Start report issued");
    }

    /// Apply a remote command to the player.
    #[instrument(skip(self), fields(kind = command.kind()))]
    pub fn on_inbound_command(&mut self, command: Command) {
        match command {
            Command::OpenVideo { video_id } => {
                info!(video_id = %video_id, "Remote requested video");
                self.opener.open_video(&video_id);
            }
            Command::Seek { position_ms } => {
                self.controller.set_position_ms(position_ms);
                self.post_state(PlaybackSnapshot {
                    position_ms,
                    duration_ms: self.controller.duration_ms(),
                    is_playing: self.controller.is_playing(),
                });
            }
            Command::Play => self.post_play(true),
            Command::Pause => self.post_play(false),
            Command::Unknown => {
                debug!("Ignoring unsupported remote command");
            }
        }
    }

    /// Route an event from the subscription worker.
    ///
    /// Events from a subscription other than the current one are dropped.
    pub fn handle_event(&mut self, event: BridgeEvent) {
        let subscription = event.subscription();

        if self.subscription_id() != Some(subscription) {
            debug!(subscription = %subscription, "Dropping event from cancelled subscription");
            return;
        }

        match event {
            BridgeEvent::Command { command, .. } => self.on_inbound_command(command),
            BridgeEvent::ChannelFailed { error, .. } => {
                self.subscription = None;
                error!(subscription = %subscription, error = ?error, "Remote command channel failed");
                self.messages
                    .show_message(&format!("Remote control error: {}", error));
            }
            BridgeEvent::ChannelClosed { .. } => {
                self.subscription = None;
                info!(subscription = %subscription, "Remote command channel closed");
            }
        }
    }

    /// Wait for the next event from the subscription worker.
    pub async fn next_event(&mut self) -> Option<BridgeEvent> {
        self.event_rx.recv().await
    }

    /// Cancel the subscription and both reports.
    pub fn shutdown(&mut self) {
        self.stop_listening();
    }

    /// Current inbound subscription state.
    pub fn state(&self) -> SubscriptionState {
        match &self.subscription {
            Some(subscription) => SubscriptionState::Listening {
                subscription: subscription.id(),
            },
            None => SubscriptionState::Unsubscribed,
        }
    }

    /// Id of the active subscription, if listening.
    pub fn subscription_id(&self) -> Option<Uuid> {
        self.subscription.as_ref().map(CommandSubscription::id)
    }

    /// Whether a report of the given kind is still running.
    pub fn is_report_in_flight(&self, kind: ReportKind) -> bool {
        match kind {
            ReportKind::Started => self.start_report.is_in_flight(),
            ReportKind::StateChanged => self.state_report.is_in_flight(),
        }
    }

    fn start_listening(&mut self) {
        if self.subscription.is_some() {
            return;
        }

        let stream = self.channel.subscribe_commands();
        let subscription = CommandSubscription::spawn(stream, self.event_tx.clone());

        info!(subscription = %subscription.id(), "Listening for remote commands");

        self.subscription = Some(subscription);
    }

    fn stop_listening(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            info!(subscription = %subscription.id(), "Stopped listening for remote commands");
        }

        let start_cancelled = self.start_report.cancel();
        let state_cancelled = self.state_report.cancel();

        if start_cancelled || state_cancelled {
            debug!(start_cancelled, state_cancelled, "Cancelled in-flight reports");
        }
    }

    fn post_play(&mut self, playing: bool) {
        self.controller.set_playing(playing);
        self.post_state(PlaybackSnapshot {
            position_ms: self.controller.position_ms(),
            duration_ms: self.controller.duration_ms(),
            is_playing: playing,
        });
    }

    fn post_state(&mut self, snapshot: PlaybackSnapshot) {
        let report = self.channel.report_state_changed(snapshot);

        if self.state_report.replace(tokio::spawn(report)) {
            debug!("Superseded in-flight state report");
        }

        debug!(
            position_ms = snapshot.position_ms,
            duration_ms = snapshot.duration_ms,
            is_playing = snapshot.is_playing,
            "State report issued"
        );
    }
}

impl Drop for SessionBridge {
    fn drop(&mut self) {
        self.stop_listening();
    }
}

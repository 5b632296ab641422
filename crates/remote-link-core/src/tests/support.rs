//! Recording fakes for the bridge collaborators.

use crate::{
    Command, CommandStream, CoreResult, MessageSink, PlaybackController, PlaybackSnapshot,
    RemoteChannel, Report, VideoOpener,
};

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering},
};

use futures::{FutureExt, StreamExt, future, stream};
use tokio::sync::mpsc;

/// Outbound call recorded by [`FakeChannel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ReportCall {
    Started {
        video_id: String,
        position_ms: u64,
        duration_ms: u64,
    },
    StateChanged(PlaybackSnapshot),
}

/// Increments a counter when dropped.
struct DropCounter(Arc<AtomicUsize>);

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Channel whose inbound side is fed by the test and whose reports never
/// complete on their own.
#[derive(Default)]
pub(crate) struct FakeChannel {
    subscriptions: Mutex<Vec<mpsc::UnboundedSender<CoreResult<Command>>>>,
    subscribe_calls: AtomicUsize,
    reports: Mutex<Vec<ReportCall>>,
    dropped_reports: Arc<AtomicUsize>,
}

impl FakeChannel {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Number of times `subscribe_commands` was called.
    pub(crate) fn subscribe_count(&self) -> usize {
        self.subscribe_calls.load(Ordering::SeqCst)
    }

    /// Push an item into the most recent subscription.
    #[allow(clippy::unwrap_used)]
    pub(crate) fn push(&self, item: CoreResult<Command>) {
        let subscriptions = self.subscriptions.lock().unwrap();
        let _ = subscriptions.last().unwrap().send(item);
    }

    /// End the most recent subscription's stream.
    #[allow(clippy::unwrap_used)]
    pub(crate) fn close_latest(&self) {
        self.subscriptions.lock().unwrap().pop();
    }

    /// Whether the most recent subscription's stream has been dropped.
    #[allow(clippy::unwrap_used)]
    pub(crate) fn latest_closed(&self) -> bool {
        self.subscriptions
            .lock()
            .unwrap()
            .last()
            .is_some_and(|tx| tx.is_closed())
    }

    #[allow(clippy::unwrap_used)]
    pub(crate) fn reports(&self) -> Vec<ReportCall> {
        self.reports.lock().unwrap().clone()
    }

    /// Number of report futures dropped (aborted) before completing.
    pub(crate) fn dropped_reports(&self) -> usize {
        self.dropped_reports.load(Ordering::SeqCst)
    }

    #[allow(clippy::unwrap_used)]
    fn record(&self, call: ReportCall) -> Report {
        self.reports.lock().unwrap().push(call);
        let guard = DropCounter(Arc::clone(&self.dropped_reports));
        async move {
            let _guard = guard;
            future::pending::<()>().await;
        }
        .boxed()
    }
}

impl RemoteChannel for FakeChannel {
    #[allow(clippy::unwrap_used)]
    fn subscribe_commands(&self) -> CommandStream {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribe_calls.fetch_add(1, Ordering::SeqCst);
        self.subscriptions.lock().unwrap().push(tx);
        stream::unfold(rx, |mut rx| async move {
            let item = rx.recv().await?;
            Some((item, rx))
        })
        .boxed()
    }

    fn report_started(&self, video_id: &str, position_ms: u64, duration_ms: u64) -> Report {
        self.record(ReportCall::Started {
            video_id: video_id.to_string(),
            position_ms,
            duration_ms,
        })
    }

    fn report_state_changed(&self, snapshot: PlaybackSnapshot) -> Report {
        self.record(ReportCall::StateChanged(snapshot))
    }
}

/// In-memory player.
pub(crate) struct FakePlayer {
    position_ms: AtomicU64,
    duration_ms: AtomicU64,
    playing: AtomicBool,
    mutations: AtomicUsize,
}

impl FakePlayer {
    pub(crate) fn new(position_ms: u64, duration_ms: u64, playing: bool) -> Arc<Self> {
        Arc::new(Self {
            position_ms: AtomicU64::new(position_ms),
            duration_ms: AtomicU64::new(duration_ms),
            playing: AtomicBool::new(playing),
            mutations: AtomicUsize::new(0),
        })
    }

    pub(crate) fn mutations(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }
}

impl PlaybackController for FakePlayer {
    fn position_ms(&self) -> u64 {
        self.position_ms.load(Ordering::SeqCst)
    }

    fn duration_ms(&self) -> u64 {
        self.duration_ms.load(Ordering::SeqCst)
    }

    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    fn set_position_ms(&self, position_ms: u64) {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        self.position_ms.store(position_ms, Ordering::SeqCst);
    }

    fn set_playing(&self, playing: bool) {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        self.playing.store(playing, Ordering::SeqCst);
    }
}

/// Records every call as a string.
#[derive(Default)]
pub(crate) struct Recorder {
    calls: Mutex<Vec<String>>,
}

impl Recorder {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    #[allow(clippy::unwrap_used)]
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    #[allow(clippy::unwrap_used)]
    fn push(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }
}

impl VideoOpener for Recorder {
    fn open_video(&self, video_id: &str) {
        self.push(video_id);
    }
}

impl MessageSink for Recorder {
    fn show_message(&self, message: &str) {
        self.push(message);
    }
}

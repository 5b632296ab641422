mod bridge_event;
mod lifecycle_event;
mod session_bridge;
pub(crate) mod subscription;
pub(crate) mod task_slot;

pub use {
    bridge_event::BridgeEvent,
    lifecycle_event::LifecycleEvent,
    session_bridge::{ReportKind, SessionBridge, SubscriptionState},
};

/// Capacity of the worker-to-dispatch event channel.
pub(crate) const EVENT_CHANNEL_CAPACITY: usize = 32;

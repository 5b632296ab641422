use crate::{BridgeError, Command};

use uuid::Uuid;

/// Events posted by the subscription worker to the dispatch context.
///
/// Every event carries the id of the subscription that produced it so the
/// bridge can drop deliveries from a subscription it already cancelled.
#[derive(Debug)]
pub enum BridgeEvent {
    /// A command arrived on the channel.
    Command {
        /// Subscription that delivered the command.
        subscription: Uuid,
        /// The decoded command.
        command: Command,
    },
    /// The channel failed. The subscription is over.
    ChannelFailed {
        /// Subscription that failed.
        subscription: Uuid,
        /// The channel error.
        error: BridgeError,
    },
    /// The command stream ended without error.
    ChannelClosed {
        /// Subscription whose stream ended.
        subscription: Uuid,
    },
}

impl BridgeEvent {
    /// Id of the subscription that produced this event.
    pub fn subscription(&self) -> Uuid {
        match self {
            BridgeEvent::Command { subscription, .. }
            | BridgeEvent::ChannelFailed { subscription, .. }
            | BridgeEvent::ChannelClosed { subscription } => *subscription,
        }
    }
}

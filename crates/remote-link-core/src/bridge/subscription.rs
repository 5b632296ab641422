use crate::{BridgeEvent, CommandStream};

use futures::StreamExt;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::debug;
use uuid::Uuid;

/// Active inbound command subscription.
///
/// Owns the worker task pulling from the channel. Dropping the subscription
/// aborts the worker, which drops the stream and releases the channel.
#[derive(Debug)]
pub(crate) struct CommandSubscription {
    id: Uuid,
    worker: JoinHandle<()>,
}

impl CommandSubscription {
    /// Spawn a worker that forwards `stream` to the dispatch context.
    pub(crate) fn spawn(stream: CommandStream, event_tx: mpsc::Sender<BridgeEvent>) -> Self {
        let id = Uuid::new_v4();
        let worker = tokio::spawn(forward_commands(id, stream, event_tx));
        Self { id, worker }
    }

    pub(crate) fn id(&self) -> Uuid {
        self.id
    }
}

impl Drop for CommandSubscription {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

/// Pull commands until the stream ends, fails, or the bridge goes away.
async fn forward_commands(
    subscription: Uuid,
    mut stream: CommandStream,
    event_tx: mpsc::Sender<BridgeEvent>,
) {
    while let Some(item) = stream.next().await {
        let event = match item {
            Ok(command) => BridgeEvent::Command {
                subscription,
                command,
            },
            Err(error) => {
                if event_tx
                    .send(BridgeEvent::ChannelFailed {
                        subscription,
                        error,
                    })
                    .await
                    .is_err()
                {
                    debug!(subscription = %subscription, "Dispatch context gone, channel failure not delivered");
                }
                return;
            }
        };

        if event_tx.send(event).await.is_err() {
            debug!(subscription = %subscription, "Dispatch context gone, stopping worker");
            return;
        }
    }

    if event_tx
        .send(BridgeEvent::ChannelClosed { subscription })
        .await
        .is_err()
    {
        debug!(subscription = %subscription, "Dispatch context gone, channel close not delivered");
    }
}

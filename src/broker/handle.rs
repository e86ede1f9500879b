use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::oneshot;
use tracing::warn;

use crate::broker::event::BrokerEvent;
use crate::broker::message::Message;
use crate::client::{Subscriber, SubscriberId};
use crate::utils::error::{Error, Result};

/// Cloneable entry point into the broker's control loop.
///
/// All operations are fire-and-forget: they enqueue an event and return
/// immediately. If the loop has already stopped the event is dropped.
#[derive(Debug, Clone)]
pub struct BrokerHandle {
    events: UnboundedSender<BrokerEvent>,
}

impl BrokerHandle {
    pub(crate) fn new(events: UnboundedSender<BrokerEvent>) -> Self {
        Self { events }
    }

    pub fn join(&self, subscriber: Subscriber) {
        self.send(BrokerEvent::Join(subscriber));
    }

    pub fn leave(&self, id: SubscriberId) {
        self.send(BrokerEvent::Leave(id));
    }

    /// Submits a message for broadcast to every subscriber present when the
    /// broker processes it.
    pub fn publish(&self, message: impl Into<Message>) {
        self.send(BrokerEvent::Publish(message.into()));
    }

    /// Number of subscribers after every event queued so far has been applied.
    pub async fn subscriber_count(&self) -> Result<usize> {
        let (tx, rx) = oneshot::channel();
        self.events
            .send(BrokerEvent::Stats(tx))
            .map_err(|_| Error::BrokerUnavailable)?;
        rx.await.map_err(|_| Error::BrokerUnavailable)
    }

    fn send(&self, event: BrokerEvent) {
        if let Err(err) = self.events.send(event) {
            warn!(event = ?err.0, "broker is not running, event dropped");
        }
    }
}

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use uuid::Uuid;

use crate::broker::message::Message;

/// Opaque handle identifying one streaming connection.
pub type SubscriberId = Uuid;

/// The broker-facing half of a subscriber channel.
///
/// The broker holds the only `sender`; dropping it closes the channel, which is
/// how a processed Leave reaches the streaming connection as end-of-stream.
#[derive(Debug)]
pub struct Subscriber {
    /// Unique identifier, fresh for every connection.
    pub id: SubscriberId,

    /// Unbounded FIFO of messages headed to the connection.
    pub sender: UnboundedSender<Message>,
}

impl Subscriber {
    pub fn new(sender: UnboundedSender<Message>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
        }
    }

    /// Creates a subscriber together with the receiving half its connection drains.
    pub fn channel() -> (Self, UnboundedReceiver<Message>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

//! Control-plane events consumed by the broker loop.

use tokio::sync::oneshot;

use crate::broker::message::Message;
use crate::client::{Subscriber, SubscriberId};

/// One unit of work for the broker's control loop.
///
/// `Join`, `Leave` and `Publish` are the only mutators of the subscriber set.
/// `Stats` is read-only but is ordered with the others, so the count it
/// reports reflects every event sent before it.
#[derive(Debug)]
pub enum BrokerEvent {
    Join(Subscriber),
    Leave(SubscriberId),
    Publish(Message),
    Stats(oneshot::Sender<usize>),
}

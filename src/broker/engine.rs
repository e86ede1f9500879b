//! Broker engine
//!
//! This module contains the broker core responsible for:
//! - tracking the set of currently connected subscribers
//! - fanning each published message out to every member of that set
//! - closing a subscriber's channel when it leaves
//!
//! Concurrency and usage notes:
//! - The broker is never shared. It is moved into a single task (`run`) that
//!   consumes `BrokerEvent`s from an unbounded queue one at a time. Every other
//!   component talks to it through a cloned `BrokerHandle`.
//! - Because the subscriber map has exactly one mutator, a publish sees the
//!   exact membership established by every join/leave queued before it.
//! - The synchronous `join` / `leave` / `publish` methods apply one event each
//!   and are public so the state machine can be driven directly in tests.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::broker::event::BrokerEvent;
use crate::broker::handle::BrokerHandle;
use crate::broker::message::Message;
use crate::client::{Subscriber, SubscriberId};

#[derive(Debug)]
pub struct Broker {
    subscribers: HashMap<SubscriberId, UnboundedSender<Message>>,
    events: UnboundedReceiver<BrokerEvent>,
}

impl Broker {
    /// Creates a broker and the handle used to feed it events.
    ///
    /// Nothing happens until `run` is polled; see `spawn` for the usual wiring.
    pub fn new() -> (Self, BrokerHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let broker = Self {
            subscribers: HashMap::new(),
            events: rx,
        };
        (broker, BrokerHandle::new(tx))
    }

    /// Creates a broker and moves its control loop onto a tokio task.
    pub fn spawn() -> (BrokerHandle, JoinHandle<()>) {
        let (broker, handle) = Self::new();
        let task = tokio::spawn(broker.run());
        (handle, task)
    }

    /// The control loop.
    ///
    /// Runs until every `BrokerHandle` is dropped. On exit the subscriber map
    /// is dropped with it, which closes every channel still registered.
    pub async fn run(mut self) {
        while let Some(event) = self.events.recv().await {
            self.apply(event);
        }
        debug!(
            remaining = self.subscribers.len(),
            "broker control loop stopped"
        );
    }

    pub fn apply(&mut self, event: BrokerEvent) {
        match event {
            BrokerEvent::Join(subscriber) => self.join(subscriber),
            BrokerEvent::Leave(id) => self.leave(&id),
            BrokerEvent::Publish(message) => self.publish(&message),
            BrokerEvent::Stats(reply) => {
                // The requester may have given up waiting.
                let _ = reply.send(self.subscriber_count());
            }
        }
    }

    /// Adds a subscriber.
    ///
    /// Joining again with an id that is already present only re-marks
    /// presence: the registered sender is kept and the new one is dropped, so
    /// an existing channel is never closed without a Leave.
    pub fn join(&mut self, subscriber: Subscriber) {
        match self.subscribers.entry(subscriber.id) {
            Entry::Occupied(_) => {
                debug!(subscriber = %subscriber.id, "repeated join for present subscriber");
            }
            Entry::Vacant(entry) => {
                entry.insert(subscriber.sender);
                info!(subscriber = %subscriber.id, "New client connection");
            }
        }
    }

    /// Removes a subscriber and closes its channel.
    ///
    /// The broker owns the only sender, so dropping it here is the single
    /// closure of the channel. Unknown ids are ignored.
    pub fn leave(&mut self, id: &SubscriberId) {
        if let Some(sender) = self.subscribers.remove(id) {
            drop(sender);
            info!(subscriber = %id, "Removed client");
        } else {
            debug!(subscriber = %id, "leave for unknown subscriber ignored");
        }
    }

    /// Enqueues `message` to every current subscriber.
    pub fn publish(&self, message: &Message) {
        for (id, sender) in &self.subscribers {
            if sender.send(message.clone()).is_err() {
                // Receiver is mid-teardown; its Leave is already on the way.
                debug!(subscriber = %id, "dropped message for closing subscriber");
            }
        }
        info!(
            recipients = self.subscribers.len(),
            "Broadcast message to {} clients",
            self.subscribers.len()
        );
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_subscribed(&self, id: &SubscriberId) -> bool {
        self.subscribers.contains_key(id)
    }
}

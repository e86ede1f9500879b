//! The broker core.
//!
//! `Broker` owns the subscriber set and applies join, leave and publish events
//! in arrival order from a single task. `BrokerHandle` is how the rest of the
//! crate reaches it.

pub mod engine;
pub mod event;
pub mod handle;
pub mod message;

pub use engine::Broker;
pub use handle::BrokerHandle;
pub use message::Message;

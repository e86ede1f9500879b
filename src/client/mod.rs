//! The `client` module defines the subscriber side of the broadcaster.
//!
//! A `Subscriber` is created for every streaming connection. Its sending half is
//! handed to the broker on join, while the connection keeps the receiver and
//! drains it onto the HTTP response.

pub mod subscriber;
pub use subscriber::{Subscriber, SubscriberId};

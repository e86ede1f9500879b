//! Built-in publishers.
//!
//! Anything holding a `BrokerHandle` can publish. The ticker is the one that
//! ships with the server; `POST /publish` in the transport layer is the other.

pub mod ticker;

pub use ticker::{run_ticker, spawn_ticker};

#[cfg(test)]
mod tests;

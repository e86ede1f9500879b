//! # PopStream
//!
//! `popstream` is a minimalist, in-memory broadcaster that pushes text events to
//! any number of HTTP clients over Server-Sent Events.
//!
//! ## Core Modules
//!
//! - `broker`: The single control loop that owns the subscriber set and fans out messages.
//! - `client`: The per-connection subscriber channel.
//! - `config`: Loading server configuration from files and the environment.
//! - `publisher`: Built-in publishers (the clock ticker).
//! - `transport`: The HTTP server, the event-stream handler and the landing page.
//! - `utils`: Error type and logging setup.

pub mod broker;
pub mod client;
pub mod config;
pub mod publisher;
pub mod transport;
pub mod utils;

//! The `error` module defines the error type used across `popstream`.
//!
//! Only startup and wiring code can fail. The broker's join, leave and publish
//! operations have no error path; the one broker call that can fail is
//! `subscriber_count`, when the control loop is gone.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] io::Error),

    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("broker is not running")]
    BrokerUnavailable,
}

pub type Result<T> = std::result::Result<T, Error>;

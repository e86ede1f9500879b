//! Server-sent events transport
//!
//! Bridges one HTTP request to one broker subscriber:
//! - reject transports that cannot flush a body incrementally
//! - create a subscriber channel and join it to the broker
//! - watch for the connection going away and leave the broker when it does
//! - drain the channel onto the response, one event per message
//!
//! The response stream owns a `ConnectionGuard` holding a drop guard on the
//! connection's cancellation token. hyper drops the body when the client
//! disconnects or the connection fails, and graceful shutdown cancels the
//! parent token; both paths fire the watcher, which sends the Leave. The
//! broker then closes the channel and the stream ends once buffered events
//! are written.

use std::convert::Infallible;

use axum::extract::State;
use axum::http::{StatusCode, Uri, Version, header};
use axum::response::sse::{Event, Sse};
use axum::response::{IntoResponse, Response};
use futures_util::StreamExt;
use thiserror::Error;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{info, warn};

use crate::broker::{BrokerHandle, Message};
use crate::client::{Subscriber, SubscriberId};
use crate::transport::http::AppState;

/// Failures surfaced to a streaming client before it is registered.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("Streaming unsupported!")]
    Unsupported,
}

impl IntoResponse for StreamError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

/// Only HTTP/1.1 and later can carry an open-ended chunked body.
pub fn supports_streaming(version: Version) -> bool {
    version != Version::HTTP_09 && version != Version::HTTP_10
}

/// Builds the event for one message.
///
/// Multi-line text stays a single event: every line gets its own `data:`
/// field. Carriage returns are folded into line feeds since SSE field values
/// cannot carry them.
pub fn message_event(message: &Message) -> Event {
    let text = message.as_str().replace("\r\n", "\n").replace('\r', "\n");
    Event::default().data(format!("Message: {text}"))
}

pub async fn stream_events(State(state): State<AppState>, version: Version, uri: Uri) -> Response {
    if !supports_streaming(version) {
        warn!(?version, path = %uri.path(), "event stream requested over non-streaming transport");
        return StreamError::Unsupported.into_response();
    }

    let (subscriber, receiver) = Subscriber::channel();
    let id = subscriber.id;
    state.broker.join(subscriber);

    let closed = state.shutdown.child_token();
    spawn_disconnect_watcher(state.broker.clone(), id, closed.clone());

    let guard = ConnectionGuard::new(closed.drop_guard(), uri.path().to_owned());
    let events = UnboundedReceiverStream::new(receiver).map(move |message| {
        let _guard = &guard;
        Ok::<_, Infallible>(message_event(&message))
    });

    (
        [(header::CONNECTION, "keep-alive")],
        Sse::new(events),
    )
        .into_response()
}

fn spawn_disconnect_watcher(broker: BrokerHandle, id: SubscriberId, closed: CancellationToken) {
    tokio::spawn(async move {
        closed.cancelled().await;
        broker.leave(id);
        info!(subscriber = %id, "HTTP connection just closed.");
    });
}

/// Lives exactly as long as the response stream.
pub(crate) struct ConnectionGuard {
    _closed: DropGuard,
    path: String,
}

impl ConnectionGuard {
    pub(crate) fn new(closed: DropGuard, path: String) -> Self {
        Self {
            _closed: closed,
            path,
        }
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        info!("Closed connection at {}", self.path);
    }
}

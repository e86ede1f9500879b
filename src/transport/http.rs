//! HTTP server wiring
//!
//! Builds the router and runs it until the shared shutdown token fires.
//! Every component reaches the broker through the `BrokerHandle` carried in
//! `AppState`; there is no global broker.

use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tera::Tera;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::broker::BrokerHandle;
use crate::config::ServerSettings;
use crate::transport::{landing, publish, sse};
use crate::utils::error::{Error, Result};

#[derive(Clone)]
pub struct AppState {
    pub broker: BrokerHandle,
    /// Parent of every connection's token; cancelling it ends all streams.
    pub shutdown: CancellationToken,
    pub pages: Arc<Tera>,
}

impl AppState {
    pub fn new(broker: BrokerHandle, shutdown: CancellationToken) -> Result<Self> {
        Ok(Self {
            broker,
            shutdown,
            pages: Arc::new(landing::load_templates()?),
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(landing::index))
        .route("/events/", get(sse::stream_events))
        .route("/events/*rest", get(sse::stream_events))
        .route("/publish", post(publish::publish_message))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Binds the configured address and serves until shutdown.
pub async fn start_server(settings: &ServerSettings, state: AppState) -> Result<()> {
    let addr = settings.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| Error::Bind {
            addr: addr.clone(),
            source,
        })?;

    info!("popstream listening on http://{addr}");
    serve(listener, state).await
}

/// Serves on an already bound listener.
///
/// Returns once the shutdown token is cancelled and every open stream has
/// finished.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    let shutdown = state.shutdown.clone();
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(Error::Serve)
}

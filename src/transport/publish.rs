use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::debug;

use crate::transport::http::AppState;
use crate::transport::message::PublishRequest;

/// External publisher entry point. Accepted means queued, not delivered.
pub async fn publish_message(
    State(state): State<AppState>,
    Json(request): Json<PublishRequest>,
) -> StatusCode {
    debug!(len = request.message.len(), "publish request received");
    state.broker.publish(request.message);
    StatusCode::ACCEPTED
}

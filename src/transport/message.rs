use serde::{Deserialize, Serialize};

/// Body of `POST /publish`.
#[derive(Debug, Deserialize, Serialize)]
pub struct PublishRequest {
    pub message: String,
}

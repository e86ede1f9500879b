use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use tera::{Context, Tera};
use tracing::{error, info};

use crate::transport::http::AppState;
use crate::utils::error::Result;

pub const INDEX_TEMPLATE: &str = "index.html";

/// Compiles the embedded landing page so template errors surface at startup.
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_template(INDEX_TEMPLATE, include_str!("../../templates/index.html"))?;
    Ok(tera)
}

pub async fn index(State(state): State<AppState>, uri: Uri) -> Response {
    let mut context = Context::new();
    context.insert("name", "friend");

    let response = match state.pages.render(INDEX_TEMPLATE, &context) {
        Ok(page) => Html(page).into_response(),
        Err(err) => {
            error!(error = %err, "failed to render landing page");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    };
    info!("Closing connection at {}", uri.path());
    response
}

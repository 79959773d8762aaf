use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Json, Router,
};
use log::{debug, error, info};
use serde::Deserialize;

use crate::pipelines::text_classification::Predictor;

/// The rendered page and its result banners
pub mod page;

pub use page::{Banner, Page};

/// Application state, shared read-only by every request
pub struct AppState {
    predictor: Predictor,
    page: Page,
}

impl AppState {
    /// Wrap a predictor that was built at start-up
    pub fn new(predictor: Predictor) -> Result<Self, UiError> {
        Ok(Self {
            predictor,
            page: Page::new()?,
        })
    }
}

/// Form fields submitted by the page
#[derive(Debug, Deserialize)]
pub struct ClassifyForm {
    /// The message to check
    #[serde(default)]
    pub message: String,
}

/// Build the router for the interactive surface
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index).post(classify))
        .route("/health", get(health))
        .with_state(state)
}

/// Render the empty form
async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, UiError> {
    Ok(Html(state.page.render("", None)?))
}

/// Classify the submitted message and render the form with its result
async fn classify(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ClassifyForm>,
) -> Result<Html<String>, UiError> {
    let outcome = state.predictor.classify(&form.message);

    match &outcome {
        Ok(label) => info!("Classified message as {}", label),
        Err(err) => debug!("Not classified: {}", err),
    }

    let banner = Banner::from_outcome(&outcome);

    Ok(Html(state.page.render(&form.message, Some(banner))?))
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "model_loaded": state.predictor.is_available(),
    }))
}

/// UI Error
#[derive(thiserror::Error, Debug)]
pub enum UiError {
    /// The page template failed to parse or render
    #[error("template error: {0}")]
    Template(#[from] liquid::Error),
}

impl IntoResponse for UiError {
    fn into_response(self) -> Response {
        error!("{}", self);

        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}

use crate::AppState;
use anyhow::anyhow;
use askama::Template;
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::AppError;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub app_name: String,
    pub input_placeholder: String,
    pub welcome_message: String,
}

/// Renders the chat interface.
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let app = &state.settings.app;
    IndexTemplate {
        app_name: app.name.clone(),
        input_placeholder: app.input_placeholder.clone(),
        welcome_message: app.welcome_message.clone(),
    }
}

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "tutor-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn not_found() -> AppError {
    AppError::NotFound(anyhow!("Route not found"))
}

//! Page handlers and health check

use axum::{http::header, response::Html, response::IntoResponse, Json};
use serde::Serialize;

const INDEX_HTML: &str = include_str!("../../web/index.html");
const VISUALS_HTML: &str = include_str!("../../web/visuals.html");
const APP_JS: &str = include_str!("../../web/app.js");

/// GET / - Entry form and recent transactions
pub async fn index_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /visuals - The four charts
pub async fn visuals_page() -> Html<&'static str> {
    Html(VISUALS_HTML)
}

/// GET /static/app.js - Script for the entry page
pub async fn app_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        APP_JS,
    )
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /api/health - Liveness check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

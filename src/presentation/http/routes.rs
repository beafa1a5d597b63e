// src/presentation/http/routes.rs
use crate::application::pipeline::StatsSnapshot;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, Router, routing::get};
use serde::Serialize;
use tower_http::trace::TraceLayer;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

#[must_use]
pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stats", get(stats))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(state))
}

pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".into(),
    })
}

pub async fn stats(Extension(state): Extension<HttpState>) -> Json<StatsSnapshot> {
    Json(state.stats.snapshot())
}

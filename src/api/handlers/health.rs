use crate::AppState;
use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub storage: String,
    pub tracked_clients: usize,
    pub version: String,
}

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let storage = if state.store.list().await.is_ok() {
        "connected"
    } else {
        "unreachable"
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        storage: storage.to_string(),
        tracked_clients: state.quota.tracked_clients(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

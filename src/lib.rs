pub mod api;
pub mod config;
pub mod infrastructure;
pub mod services;
pub mod utils;
pub mod views;

use crate::config::AppConfig;
use crate::services::quota::UploadQuota;
use crate::services::storage::ObjectStore;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::services::ServeDir;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ObjectStore>,
    pub quota: Arc<UploadQuota>,
    pub config: AppConfig,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::handlers::gallery::list_images))
        .route("/health", get(api::handlers::health::health_check))
        .route(
            "/upload",
            post(api::handlers::gallery::upload_image).layer(DefaultBodyLimit::max(
                state.config.max_upload_size + 1024 * 1024, // headroom for multipart framing
            )),
        )
        .route("/delete", post(api::handlers::gallery::delete_image))
        .route(
            "/delete/:key",
            post(api::handlers::gallery::delete_image_by_path),
        )
        .nest_service("/public", ServeDir::new("public"))
        .with_state(state)
}

pub mod api;
pub mod config;
pub mod error;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use state::AppState;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_request_bytes();

    let api_routes = Router::new()
        .route("/api/enhance", post(api::enhance))
        .route("/api/enhance-batch", post(api::enhance_batch))
        .route("/api/tag-image", post(api::tag_image))
        .route("/api/generate-pdf", post(api::generate_pdf))
        .route("/api/assemble-pdf", post(api::assemble_pdf))
        .route(
            "/api/photos/:workspace",
            get(api::load_photos).put(api::save_photos),
        )
        .layer(DefaultBodyLimit::max(body_limit));

    Router::new()
        .route("/health", get(api::health_check))
        .merge(api_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub mod health;
pub mod resumes;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/resumes", post(resumes::handle_generate))
        .route(
            "/api/v1/resumes/:run_id/progress",
            get(resumes::handle_progress),
        )
        .route(
            "/api/v1/resumes/:run_id/download",
            get(resumes::handle_download),
        )
        .route(
            "/api/v1/resumes/:run_id/preview",
            get(resumes::handle_preview),
        )
        .with_state(state)
}

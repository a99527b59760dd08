use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;

use super::AppState;
use super::handlers::{channels, sessions, status};

/// Route table of the CRUD surface plus the live log feed. CORS is
/// wide open, as the original service shipped it; callers are expected
/// to sit behind their own edge.
pub(crate) fn build_api_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    Router::new()
        .route("/", get(status::home))
        .route("/add_channel", put(channels::add_channel))
        .route("/edit_channel", put(channels::edit_channel))
        .route("/del_channel", delete(channels::delete_channel))
        .route("/state", put(sessions::set_state))
        .route("/recent_replies", post(sessions::recent_replies))
        .route("/drafts", post(sessions::drafts))
        .route("/user", post(sessions::user_by_email))
        .route("/api/logs", get(super::sse_logs_endpoint))
        .layer(cors)
        .with_state(state)
}

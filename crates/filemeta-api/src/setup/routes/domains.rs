use crate::constants::{FILE_GET_PATH, FILE_POST_PATH};
use crate::handlers;
use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

pub fn file_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(FILE_GET_PATH, get(handlers::file::get_file))
        .route(FILE_POST_PATH, post(handlers::file::post_file))
        // Same handler without the trailing slash
        .route(
            FILE_POST_PATH.trim_end_matches('/'),
            post(handlers::file::post_file),
        )
        .with_state(state)
}

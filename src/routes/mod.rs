pub mod debug;
pub mod random_route;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/routes/random", get(random_route::create_random_route))
        .route("/routes/path", post(random_route::create_route_path))
        .route("/debug/health", get(debug::health_check))
        .with_state(state)
}

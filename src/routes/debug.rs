use crate::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

/// GET /debug/health - Report liveness and the active generation settings
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let config = state.route_generator.config();

    Json(json!({
        "status": "ok",
        "config": {
            "bounding_boxes": config.bounding_boxes.len(),
            "min_distance_km": config.distance_range.min_km,
            "max_distance_km": config.distance_range.max_km,
            "earth_radius_km": config.earth_radius_km,
            "max_attempts": config.max_attempts,
            "land_check_timeout_ms": config.land_check_timeout.as_millis() as u64,
            "route_fetch_timeout_ms": config.route_fetch_timeout.as_millis() as u64,
        }
    }))
}

use crate::error::{AppError, Result};
use crate::models::route::{
    RandomRouteQuery, RandomRouteResponse, RoutePathRequest, RoutePathResponse,
};
use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

/// GET /routes/random
/// Generate a random start/destination pair on land, optionally with its road path
pub async fn create_random_route(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RandomRouteQuery>,
) -> Result<Json<RandomRouteResponse>> {
    tracing::info!(
        include_path = query.include_path,
        mode = %query.mode,
        "Random route request: include_path={}, mode={}",
        query.include_path, query.mode
    );

    let candidate = state.route_generator.generate_valid_route().await?;

    let path = if query.include_path {
        Some(
            state
                .route_generator
                .fetch_route_path_with_mode(candidate.start, candidate.destination, query.mode)
                .await?,
        )
    } else {
        None
    };

    Ok(Json(RandomRouteResponse::new(candidate, path)))
}

/// POST /routes/path
/// Fetch the road path between two given points
pub async fn create_route_path(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RoutePathRequest>,
) -> Result<Json<RoutePathResponse>> {
    request.validate().map_err(AppError::InvalidRequest)?;

    tracing::info!(
        start_lat = request.start.lat,
        start_lng = request.start.lng,
        end_lat = request.end.lat,
        end_lng = request.end.lng,
        mode = %request.mode,
        "Route path request: ({:.4}, {:.4}) -> ({:.4}, {:.4}), mode={}",
        request.start.lat, request.start.lng, request.end.lat, request.end.lng, request.mode
    );

    let path = state
        .route_generator
        .fetch_route_path_with_mode(request.start, request.end, request.mode)
        .await?;

    Ok(Json(path.into()))
}

use axum::{extract::Query, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use landroute::error::AppError;
use landroute::models::{Coordinates, TransportMode};
use landroute::services::polyline::PolylineCodec;
use landroute::services::route_generator::RouteGenerator;
use landroute::services::routing::{RouteProvider, RouteRequest};
use landroute::services::valhalla::ValhallaClient;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

mod common;

use common::{LandBehavior, StubLandVerifier};

/// Validates the `json` parameter like Valhalla would and answers with the
/// reference shape on a single leg
async fn fake_route(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    let request: Value = match params.get("json").and_then(|raw| serde_json::from_str(raw).ok()) {
        Some(value) => value,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error_code": 100, "error": "Failed to parse json request"})),
            )
        }
    };

    let locations = request["locations"].as_array().map(Vec::len).unwrap_or(0);
    if locations < 2 || request["directions_options"]["units"] != "kilometers" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error_code": 120, "error": "Insufficient number of locations provided"})),
        );
    }
    if request["costing"] != "auto" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error_code": 125, "error": "No costing method found"})),
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "trip": {
                "locations": request["locations"],
                "legs": [{"shape": common::REFERENCE_POLYLINE, "summary": {"length": 612.3}}],
                "summary": {"length": 612.3, "time": 22140.0},
                "status_message": "Found route between points",
                "status": 0,
                "units": "kilometers"
            }
        })),
    )
}

async fn spawn_valhalla(router: Router) -> ValhallaClient {
    let base_url = common::spawn_server(router).await;
    ValhallaClient::new(format!("{}/route", base_url), Duration::from_millis(500)).unwrap()
}

fn endpoints() -> (Coordinates, Coordinates) {
    (
        Coordinates::new(38.5, -120.2).unwrap(),
        Coordinates::new(43.252, -126.453).unwrap(),
    )
}

#[tokio::test]
async fn test_route_returns_legs_and_summary() {
    let client = spawn_valhalla(Router::new().route("/route", get(fake_route))).await;
    let (start, end) = endpoints();

    let response = client
        .route(&RouteRequest::between(start, end, TransportMode::Drive))
        .await
        .unwrap();

    assert_eq!(response.legs.len(), 1);
    assert_eq!(response.first_leg().unwrap().shape, common::REFERENCE_POLYLINE);
    let summary = response.summary.unwrap();
    assert_eq!(summary.length_km, 612.3);
    assert_eq!(summary.time_seconds, 22140.0);
}

#[tokio::test]
async fn test_valhalla_rejection_is_routing_failure() {
    let client = spawn_valhalla(Router::new().route("/route", get(fake_route))).await;
    let (start, end) = endpoints();

    // The fake only knows the "auto" costing
    let result = client
        .route(&RouteRequest::between(start, end, TransportMode::Walk))
        .await;
    match result {
        Err(AppError::RoutingFailure(message)) => {
            assert!(message.contains("400"), "{}", message);
            assert!(message.contains("No costing method found"), "{}", message);
        }
        other => panic!("expected RoutingFailure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unexpected_body_is_routing_failure() {
    let router = Router::new().route("/route", get(|| async { Json(json!({"routes": []})) }));
    let client = spawn_valhalla(router).await;
    let (start, end) = endpoints();

    let result = client
        .route(&RouteRequest::between(start, end, TransportMode::Drive))
        .await;
    assert!(matches!(result, Err(AppError::RoutingFailure(_))));
}

#[tokio::test]
async fn test_unreachable_service_is_routing_failure() {
    // Bind then drop a listener to get a port nothing is serving
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ValhallaClient::new(format!("http://{}/route", addr), Duration::from_millis(500))
        .unwrap();
    let (start, end) = endpoints();

    let result = client
        .route(&RouteRequest::between(start, end, TransportMode::Drive))
        .await;
    assert!(matches!(result, Err(AppError::RoutingFailure(_))));
}

#[tokio::test]
async fn test_generator_fetches_and_decodes_valhalla_path() {
    let client = spawn_valhalla(Router::new().route("/route", get(fake_route))).await;
    let generator = RouteGenerator::new(
        StubLandVerifier::new(LandBehavior::AlwaysLand),
        Arc::new(client),
        PolylineCodec::standard(),
        common::scenario_config(),
    );
    let (start, end) = endpoints();

    let path = generator.fetch_route_path(start, end).await.unwrap();
    common::assert_path_matches(&path, &common::REFERENCE_PATH);
}

#[tokio::test]
async fn test_generator_surfaces_slow_routing_as_failure() {
    let router = Router::new().route(
        "/route",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            StatusCode::OK
        }),
    );
    let client = spawn_valhalla(router).await;
    let generator = RouteGenerator::new(
        StubLandVerifier::new(LandBehavior::AlwaysLand),
        Arc::new(client),
        PolylineCodec::standard(),
        common::scenario_config(),
    );
    let (start, end) = endpoints();

    let result = generator.fetch_route_path(start, end).await;
    assert!(matches!(result, Err(AppError::RoutingFailure(_))));
}

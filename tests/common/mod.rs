use async_trait::async_trait;
use landroute::config::RouteGeneratorConfig;
use landroute::error::{AppError, Result};
use landroute::models::{BoundingBox, Coordinates, DistanceRange};
use landroute::services::land_check::LandVerifier;
use landroute::services::polyline::PolylineCodec;
use landroute::services::route_generator::RouteGenerator;
use landroute::services::routing::{RouteLeg, RouteProvider, RouteRequest, RouteResponse};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// How a stub land verifier answers every call
#[allow(dead_code)]
#[derive(Clone, Copy)]
pub enum LandBehavior {
    AlwaysLand,
    AlwaysWater,
    AlwaysError,
    /// Sleeps far past any test timeout
    Hang,
}

pub struct StubLandVerifier {
    behavior: LandBehavior,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl StubLandVerifier {
    pub fn new(behavior: LandBehavior) -> Arc<Self> {
        Arc::new(StubLandVerifier {
            behavior,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LandVerifier for StubLandVerifier {
    async fn is_on_land(&self, _point: &Coordinates) -> Result<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            LandBehavior::AlwaysLand => Ok(true),
            LandBehavior::AlwaysWater => Ok(false),
            LandBehavior::AlwaysError => Err(AppError::LandCheck("HTTP 503".to_string())),
            LandBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(false)
            }
        }
    }
}

/// How a stub route provider answers every call
#[allow(dead_code)]
#[derive(Clone)]
pub enum RouteBehavior {
    Shape(String),
    NoLegs,
    Error,
    Hang,
}

pub struct StubRouteProvider {
    behavior: RouteBehavior,
    requests: Mutex<Vec<RouteRequest>>,
}

#[allow(dead_code)]
impl StubRouteProvider {
    pub fn new(behavior: RouteBehavior) -> Arc<Self> {
        Arc::new(StubRouteProvider {
            behavior,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<RouteRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl RouteProvider for StubRouteProvider {
    async fn route(&self, request: &RouteRequest) -> Result<RouteResponse> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.behavior {
            RouteBehavior::Shape(shape) => Ok(RouteResponse {
                legs: vec![RouteLeg {
                    shape: shape.clone(),
                }],
                summary: None,
            }),
            RouteBehavior::NoLegs => Ok(RouteResponse {
                legs: vec![],
                summary: None,
            }),
            RouteBehavior::Error => Err(AppError::RoutingFailure("HTTP 500: boom".to_string())),
            RouteBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(AppError::RoutingFailure("unreachable".to_string()))
            }
        }
    }
}

/// Google's reference polyline at precision 5
#[allow(dead_code)]
pub const REFERENCE_POLYLINE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

#[allow(dead_code)]
pub const REFERENCE_PATH: [(f64, f64); 3] = [(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)];

/// Box `[-1, -1, 1, 1]` with a 50-150 km window and short timeouts
#[allow(dead_code)]
pub fn scenario_config() -> RouteGeneratorConfig {
    RouteGeneratorConfig {
        bounding_boxes: vec![BoundingBox::try_from([-1.0, -1.0, 1.0, 1.0]).unwrap()],
        distance_range: DistanceRange::new(50.0, 150.0).unwrap(),
        earth_radius_km: 6371.0,
        max_attempts: 500,
        land_check_timeout: Duration::from_millis(20),
        route_fetch_timeout: Duration::from_millis(100),
    }
}

#[allow(dead_code)]
pub fn build_generator(
    land: Arc<StubLandVerifier>,
    router: Arc<StubRouteProvider>,
    config: RouteGeneratorConfig,
) -> RouteGenerator {
    RouteGenerator::new(land, router, PolylineCodec::standard(), config)
}

#[allow(dead_code)]
pub fn assert_path_matches(path: &[Coordinates], expected: &[(f64, f64)]) {
    assert_eq!(path.len(), expected.len(), "path length");
    for (point, (lat, lng)) in path.iter().zip(expected) {
        assert!((point.lat - lat).abs() < 1e-9, "lat {} != {}", point.lat, lat);
        assert!((point.lng - lng).abs() < 1e-9, "lng {} != {}", point.lng, lng);
    }
}

/// Serve `app` on an ephemeral local port and return its base URL
#[allow(dead_code)]
pub async fn spawn_server(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test server");
    let addr = listener.local_addr().expect("Failed to read local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });
    format!("http://{}", addr)
}

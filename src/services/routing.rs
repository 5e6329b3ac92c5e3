use crate::error::Result;
use crate::models::{Coordinates, TransportMode};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Computes a road route between locations.
///
/// Unlike `LandVerifier`, failures here are meant to reach the caller.
#[async_trait]
pub trait RouteProvider: Send + Sync {
    async fn route(&self, request: &RouteRequest) -> Result<RouteResponse>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub locations: Vec<Coordinates>,
    pub mode: TransportMode,
}

impl RouteRequest {
    pub fn between(start: Coordinates, end: Coordinates, mode: TransportMode) -> Self {
        RouteRequest {
            locations: vec![start, end],
            mode,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteResponse {
    pub legs: Vec<RouteLeg>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<RouteSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteLeg {
    /// Encoded polyline of the leg geometry
    pub shape: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RouteSummary {
    pub length_km: f64,
    pub time_seconds: f64,
}

impl RouteResponse {
    pub fn first_leg(&self) -> Option<&RouteLeg> {
        self.legs.first()
    }
}

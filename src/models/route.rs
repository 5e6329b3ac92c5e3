use crate::models::Coordinates;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered route geometry decoded from the routing service
pub type Path = Vec<Coordinates>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Drive,
    Bike,
    Walk,
}

impl TransportMode {
    /// Returns the Valhalla costing model for this transport mode
    pub fn valhalla_costing(&self) -> &str {
        match self {
            TransportMode::Drive => "auto",
            TransportMode::Bike => "bicycle",
            TransportMode::Walk => "pedestrian",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportMode::Drive => write!(f, "drive"),
            TransportMode::Bike => write!(f, "bike"),
            TransportMode::Walk => write!(f, "walk"),
        }
    }
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "drive" | "driving" | "auto" | "car" => Ok(TransportMode::Drive),
            "bike" | "cycling" | "bicycle" => Ok(TransportMode::Bike),
            "walk" | "walking" | "pedestrian" => Ok(TransportMode::Walk),
            _ => Err(format!("Invalid transport mode: '{}'", s)),
        }
    }
}

/// A start/destination pair accepted by the rejection sampler
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RouteCandidate {
    pub start: Coordinates,
    pub destination: Coordinates,
    /// Great-circle distance between the endpoints
    pub distance_km: f64,
}

// Request/Response types for API endpoints

#[derive(Debug, Deserialize)]
pub struct RandomRouteQuery {
    #[serde(default = "default_include_path")]
    pub include_path: bool,
    #[serde(default)]
    pub mode: TransportMode,
}

fn default_include_path() -> bool {
    true
}

impl Default for RandomRouteQuery {
    fn default() -> Self {
        RandomRouteQuery {
            include_path: default_include_path(),
            mode: TransportMode::default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RandomRouteResponse {
    #[serde(flatten)]
    pub candidate: RouteCandidate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Path>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_points: Option<usize>,
}

impl RandomRouteResponse {
    pub fn new(candidate: RouteCandidate, path: Option<Path>) -> Self {
        let path_points = path.as_ref().map(|p| p.len());
        RandomRouteResponse {
            candidate,
            path,
            path_points,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RoutePathRequest {
    pub start: Coordinates,
    pub end: Coordinates,
    #[serde(default)]
    pub mode: TransportMode,
}

impl RoutePathRequest {
    pub fn validate(&self) -> Result<(), String> {
        Coordinates::new(self.start.lat, self.start.lng).map_err(|e| format!("start: {}", e))?;
        Coordinates::new(self.end.lat, self.end.lng).map_err(|e| format!("end: {}", e))?;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RoutePathResponse {
    pub path: Path,
    pub path_points: usize,
}

impl From<Path> for RoutePathResponse {
    fn from(path: Path) -> Self {
        let path_points = path.len();
        RoutePathResponse { path, path_points }
    }
}

use crate::constants::VALHALLA_DISTANCE_UNITS;
use crate::error::{AppError, Result};
use crate::services::routing::{RouteLeg, RouteProvider, RouteRequest, RouteResponse, RouteSummary};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Route provider backed by a Valhalla `/route` endpoint
#[derive(Clone)]
pub struct ValhallaClient {
    client: Client,
    url: String,
}

impl ValhallaClient {
    pub fn new(url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build Valhalla client: {}", e)))?;

        Ok(ValhallaClient { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Serialize the request the way Valhalla expects it in the `json` query parameter
    fn request_json(request: &RouteRequest) -> Result<String> {
        let body = ValhallaRouteRequest {
            locations: request
                .locations
                .iter()
                .map(|c| ValhallaLocation {
                    lat: c.lat,
                    lon: c.lng,
                })
                .collect(),
            costing: request.mode.valhalla_costing(),
            directions_options: DirectionsOptions {
                units: VALHALLA_DISTANCE_UNITS,
            },
        };

        serde_json::to_string(&body)
            .map_err(|e| AppError::Internal(format!("Failed to encode Valhalla request: {}", e)))
    }
}

#[async_trait]
impl RouteProvider for ValhallaClient {
    async fn route(&self, request: &RouteRequest) -> Result<RouteResponse> {
        if request.locations.len() < 2 {
            return Err(AppError::InvalidInput(
                "At least 2 locations required".to_string(),
            ));
        }

        let json = Self::request_json(request)?;

        tracing::debug!(
            locations = request.locations.len(),
            costing = %request.mode.valhalla_costing(),
            "Valhalla request: {} locations, costing {}",
            request.locations.len(), request.mode.valhalla_costing()
        );

        let response = self
            .client
            .get(&self.url)
            .query(&[("json", json.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::RoutingFailure("Request timed out".to_string())
                } else {
                    AppError::RoutingFailure(format!("Request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(
                status = %status,
                "Valhalla HTTP error {}: {}",
                status, error_text
            );
            return Err(AppError::RoutingFailure(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: ValhallaRouteResponse = response
            .json()
            .await
            .map_err(|e| AppError::RoutingFailure(format!("Failed to parse response: {}", e)))?;

        let trip = body.trip;
        if let Some(summary) = &trip.summary {
            tracing::debug!(
                length_km = %format!("{:.2}", summary.length),
                time_min = %format!("{:.0}", summary.time / 60.0),
                legs = trip.legs.len(),
                "Valhalla response: {:.2}km, {:.0}min, {} legs",
                summary.length, summary.time / 60.0, trip.legs.len()
            );
        }

        Ok(RouteResponse {
            legs: trip
                .legs
                .into_iter()
                .map(|leg| RouteLeg { shape: leg.shape })
                .collect(),
            summary: trip.summary.map(|s| RouteSummary {
                length_km: s.length,
                time_seconds: s.time,
            }),
        })
    }
}

// Valhalla API request/response types

#[derive(Debug, Serialize)]
struct ValhallaRouteRequest<'a> {
    locations: Vec<ValhallaLocation>,
    costing: &'a str,
    directions_options: DirectionsOptions<'a>,
}

#[derive(Debug, Serialize)]
struct ValhallaLocation {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Serialize)]
struct DirectionsOptions<'a> {
    units: &'a str,
}

#[derive(Debug, Deserialize)]
struct ValhallaRouteResponse {
    trip: ValhallaTrip,
}

#[derive(Debug, Deserialize)]
struct ValhallaTrip {
    legs: Vec<ValhallaLeg>,
    #[serde(default)]
    summary: Option<ValhallaSummary>,
}

#[derive(Debug, Deserialize)]
struct ValhallaLeg {
    shape: String,
}

#[derive(Debug, Deserialize)]
struct ValhallaSummary {
    length: f64, // kilometers, as requested
    time: f64,   // seconds
}

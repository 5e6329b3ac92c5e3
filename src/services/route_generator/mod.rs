pub mod geometry;

use crate::config::RouteGeneratorConfig;
use crate::error::{AppError, Result};
use crate::models::{Coordinates, Path, RouteCandidate, TransportMode};
use crate::services::land_check::{classify_point, LandClassification, LandVerifier};
use crate::services::polyline::PolylineCodec;
use crate::services::routing::{RouteProvider, RouteRequest, RouteResponse};
use rand::distr::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Produces random start/destination pairs on land within a distance window,
/// and fetches road paths between them.
///
/// Holds only read-only configuration and shared collaborators, so one
/// instance can serve concurrent calls.
pub struct RouteGenerator {
    land_verifier: Arc<dyn LandVerifier>,
    route_provider: Arc<dyn RouteProvider>,
    codec: PolylineCodec,
    config: RouteGeneratorConfig,
}

/// Why sampled pairs were discarded during one generation call
#[derive(Debug, Default)]
struct RejectionStats {
    invalid: usize,
    off_land: usize,
    out_of_range: usize,
    assumed_land: usize,
}

impl RouteGenerator {
    pub fn new(
        land_verifier: Arc<dyn LandVerifier>,
        route_provider: Arc<dyn RouteProvider>,
        codec: PolylineCodec,
        config: RouteGeneratorConfig,
    ) -> Self {
        RouteGenerator {
            land_verifier,
            route_provider,
            codec,
            config,
        }
    }

    pub fn config(&self) -> &RouteGeneratorConfig {
        &self.config
    }

    /// Rejection-sample a start/destination pair using a freshly seeded RNG
    pub async fn generate_valid_route(&self) -> Result<RouteCandidate> {
        let mut rng = StdRng::from_rng(&mut rand::rng());
        self.generate_valid_route_with_rng(&mut rng).await
    }

    /// Rejection-sample a start/destination pair.
    ///
    /// Each attempt picks a bounding box, samples both endpoints inside it,
    /// checks both are on land (verifier failures count as land) and keeps the
    /// pair if its great-circle distance lies in the configured range. After
    /// `max_attempts` discarded pairs the call fails with `GenerationFailed`.
    pub async fn generate_valid_route_with_rng<R: Rng + Send>(
        &self,
        rng: &mut R,
    ) -> Result<RouteCandidate> {
        let pool = &self.config.bounding_boxes;
        if pool.is_empty() {
            return Err(AppError::InvalidInput(
                "No bounding boxes configured".to_string(),
            ));
        }
        let box_picker = Uniform::new(0, pool.len())
            .map_err(|e| AppError::InvalidInput(format!("Invalid bounding box pool: {}", e)))?;

        let range = self.config.distance_range;
        let max_attempts = self.config.max_attempts;
        let mut stats = RejectionStats::default();

        for attempt in 1..=max_attempts {
            let bbox = &pool[box_picker.sample(rng)];
            let start = geometry::sample_random_coordinate(bbox, rng)?;
            let destination = geometry::sample_random_coordinate(bbox, rng)?;

            if !start.is_finite() || !destination.is_finite() {
                stats.invalid += 1;
                continue;
            }

            if !self.check_land(&start, &mut stats).await
                || !self.check_land(&destination, &mut stats).await
            {
                stats.off_land += 1;
                continue;
            }

            let distance_km =
                geometry::great_circle_distance(&start, &destination, self.config.earth_radius_km)?;

            if !range.contains(distance_km) {
                stats.out_of_range += 1;
                continue;
            }

            tracing::info!(
                attempts = attempt,
                distance_km = %format!("{:.2}", distance_km),
                off_land = stats.off_land,
                out_of_range = stats.out_of_range,
                assumed_land = stats.assumed_land,
                "Route candidate accepted after {} attempts: ({:.5}, {:.5}) -> ({:.5}, {:.5}), {:.2}km",
                attempt, start.lat, start.lng, destination.lat, destination.lng, distance_km
            );

            return Ok(RouteCandidate {
                start,
                destination,
                distance_km,
            });
        }

        tracing::warn!(
            attempts = max_attempts,
            range = %range,
            invalid = stats.invalid,
            off_land = stats.off_land,
            out_of_range = stats.out_of_range,
            "No route candidate within {} after {} attempts",
            range, max_attempts
        );

        Err(AppError::GenerationFailed {
            attempts: max_attempts,
        })
    }

    async fn check_land(&self, point: &Coordinates, stats: &mut RejectionStats) -> bool {
        let classification = classify_point(
            self.land_verifier.as_ref(),
            point,
            self.config.land_check_timeout,
        )
        .await;

        if classification == LandClassification::AssumedLand {
            stats.assumed_land += 1;
        }
        classification.is_land()
    }

    /// Driving path between two points, decoded from the first route leg.
    /// Errors are logged and returned; there is no fallback path.
    pub async fn fetch_route_path(&self, start: Coordinates, end: Coordinates) -> Result<Path> {
        self.fetch_route_path_with_mode(start, end, TransportMode::Drive)
            .await
    }

    pub async fn fetch_route_path_with_mode(
        &self,
        start: Coordinates,
        end: Coordinates,
        mode: TransportMode,
    ) -> Result<Path> {
        let request = RouteRequest::between(start, end, mode);
        let timeout = self.config.route_fetch_timeout;

        let result = match tokio::time::timeout(timeout, self.route_provider.route(&request)).await
        {
            Ok(response) => response.and_then(|r| self.decode_first_leg(&r)),
            Err(_) => Err(AppError::RoutingFailure(format!(
                "Route request timed out after {}ms",
                timeout.as_millis()
            ))),
        };

        match result {
            Ok(path) => {
                tracing::debug!(
                    path_points = path.len(),
                    mode = %mode,
                    "Fetched route path with {} points",
                    path.len()
                );
                Ok(path)
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    mode = %mode,
                    "Failed to fetch route ({:.5}, {:.5}) -> ({:.5}, {:.5}): {}",
                    start.lat, start.lng, end.lat, end.lng, e
                );
                Err(match e {
                    AppError::RoutingFailure(_) => e,
                    other => AppError::RoutingFailure(other.to_string()),
                })
            }
        }
    }

    fn decode_first_leg(&self, response: &RouteResponse) -> Result<Path> {
        let leg = response.first_leg().ok_or_else(|| {
            AppError::RoutingFailure("Routing response contained no legs".to_string())
        })?;

        let path = self.codec.decode(&leg.shape).map_err(|e| {
            AppError::RoutingFailure(format!("Failed to decode route shape: {}", e))
        })?;

        if path.is_empty() {
            return Err(AppError::RoutingFailure(
                "Routing response contained an empty shape".to_string(),
            ));
        }

        Ok(path)
    }
}

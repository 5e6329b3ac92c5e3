use crate::constants::*;
use crate::models::{BoundingBox, DistanceRange};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub nominatim: NominatimConfig,
    pub valhalla: ValhallaConfig,
    pub route_generator: RouteGeneratorConfig,
}

#[derive(Debug, Clone)]
pub struct NominatimConfig {
    pub base_url: String,
    /// Sent as User-Agent, required by the Nominatim usage policy
    pub user_agent: String,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_NOMINATIM_BASE_URL.to_string(),
            user_agent: DEFAULT_NOMINATIM_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValhallaConfig {
    /// Full URL of the `/route` endpoint
    pub url: String,
    /// Decimal digits used by the encoded leg shapes
    pub shape_precision: u32,
}

impl Default for ValhallaConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_VALHALLA_URL.to_string(),
            shape_precision: DEFAULT_VALHALLA_SHAPE_PRECISION,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RouteGeneratorConfig {
    /// Regions the start and destination are sampled from.
    /// Both endpoints of one candidate always come from the same box.
    pub bounding_boxes: Vec<BoundingBox>,

    /// Accepted great-circle distance between start and destination
    pub distance_range: DistanceRange,

    /// Sphere radius used for the haversine distance
    pub earth_radius_km: f64,

    /// Rejection-sampling attempts before `GenerationFailed` is returned
    pub max_attempts: usize,

    /// Per-point land verification timeout. Expiry counts as "assume land".
    pub land_check_timeout: Duration,

    /// Routing request timeout. Expiry is a hard error.
    pub route_fetch_timeout: Duration,
}

impl Default for RouteGeneratorConfig {
    fn default() -> Self {
        Self {
            bounding_boxes: parse_bounding_boxes(DEFAULT_BOUNDING_BOXES_JSON).unwrap_or_default(),
            distance_range: DistanceRange::from_raw(
                DEFAULT_MIN_DISTANCE_KM,
                DEFAULT_MAX_DISTANCE_KM,
            ),
            earth_radius_km: DEFAULT_EARTH_RADIUS_KM,
            max_attempts: DEFAULT_MAX_GENERATION_ATTEMPTS,
            land_check_timeout: Duration::from_millis(DEFAULT_LAND_CHECK_TIMEOUT_MS),
            route_fetch_timeout: Duration::from_millis(DEFAULT_ROUTE_FETCH_TIMEOUT_MS),
        }
    }
}

impl RouteGeneratorConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let bounding_boxes = match env::var("ROUTE_BOUNDING_BOXES") {
            Ok(raw) => parse_bounding_boxes(&raw)
                .map_err(|e| format!("Invalid ROUTE_BOUNDING_BOXES: {}", e))?,
            Err(_) => defaults.bounding_boxes,
        };

        let min_km: f64 = env::var("ROUTE_MIN_DISTANCE_KM")
            .unwrap_or_else(|_| defaults.distance_range.min_km.to_string())
            .parse()
            .map_err(|_| "Invalid ROUTE_MIN_DISTANCE_KM")?;

        let max_km: f64 = env::var("ROUTE_MAX_DISTANCE_KM")
            .unwrap_or_else(|_| defaults.distance_range.max_km.to_string())
            .parse()
            .map_err(|_| "Invalid ROUTE_MAX_DISTANCE_KM")?;

        let config = Self {
            bounding_boxes,
            distance_range: DistanceRange::new(min_km, max_km)?,

            earth_radius_km: env::var("EARTH_RADIUS_KM")
                .unwrap_or_else(|_| defaults.earth_radius_km.to_string())
                .parse()
                .map_err(|_| "Invalid EARTH_RADIUS_KM")?,

            max_attempts: env::var("ROUTE_MAX_ATTEMPTS")
                .unwrap_or_else(|_| defaults.max_attempts.to_string())
                .parse()
                .map_err(|_| "Invalid ROUTE_MAX_ATTEMPTS")?,

            land_check_timeout: Duration::from_millis(
                env::var("LAND_CHECK_TIMEOUT_MS")
                    .unwrap_or_else(|_| DEFAULT_LAND_CHECK_TIMEOUT_MS.to_string())
                    .parse()
                    .map_err(|_| "Invalid LAND_CHECK_TIMEOUT_MS")?,
            ),

            route_fetch_timeout: Duration::from_millis(
                env::var("ROUTE_FETCH_TIMEOUT_MS")
                    .unwrap_or_else(|_| DEFAULT_ROUTE_FETCH_TIMEOUT_MS.to_string())
                    .parse()
                    .map_err(|_| "Invalid ROUTE_FETCH_TIMEOUT_MS")?,
            ),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.bounding_boxes.is_empty() {
            return Err("At least one bounding box is required".to_string());
        }
        DistanceRange::new(self.distance_range.min_km, self.distance_range.max_km)?;
        if !self.earth_radius_km.is_finite() || self.earth_radius_km <= 0.0 {
            return Err(format!(
                "Earth radius must be a positive number, got {}",
                self.earth_radius_km
            ));
        }
        if self.max_attempts == 0 {
            return Err("Maximum generation attempts must be at least 1".to_string());
        }

        // Reachability is only a warning: land checks may still make a box useless.
        let reachable = self
            .bounding_boxes
            .iter()
            .any(|bbox| bbox.diagonal_km() >= self.distance_range.min_km);
        if !reachable {
            tracing::warn!(
                min_km = self.distance_range.min_km,
                "No bounding box is large enough to produce a {:.1}km route; \
                 generation will exhaust its attempts",
                self.distance_range.min_km
            );
        }

        Ok(())
    }
}

/// Parse a JSON list of bounding boxes. Each entry may be
/// `[min_lat, min_lng, max_lat, max_lng]` or an object with named fields.
pub fn parse_bounding_boxes(raw: &str) -> Result<Vec<BoundingBox>, String> {
    serde_json::from_str(raw).map_err(|e| e.to_string())
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        let defaults_nominatim = NominatimConfig::default();
        let defaults_valhalla = ValhallaConfig::default();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            nominatim: NominatimConfig {
                base_url: env::var("NOMINATIM_BASE_URL").unwrap_or(defaults_nominatim.base_url),
                user_agent: env::var("NOMINATIM_USER_AGENT")
                    .unwrap_or(defaults_nominatim.user_agent),
            },
            valhalla: ValhallaConfig {
                url: env::var("VALHALLA_URL").unwrap_or(defaults_valhalla.url),
                shape_precision: env::var("VALHALLA_SHAPE_PRECISION")
                    .unwrap_or_else(|_| defaults_valhalla.shape_precision.to_string())
                    .parse()
                    .map_err(|_| "Invalid VALHALLA_SHAPE_PRECISION")?,
            },
            route_generator: RouteGeneratorConfig::from_env()?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

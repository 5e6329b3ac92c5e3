// --- Server defaults ---

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

// --- Geodesy ---

/// Mean Earth radius used by the haversine formula.
pub const DEFAULT_EARTH_RADIUS_KM: f64 = 6371.0;

// --- Route generation ---

pub const DEFAULT_MIN_DISTANCE_KM: f64 = 5.0;
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 50.0;

/// Attempts the rejection sampler makes before giving up.
pub const DEFAULT_MAX_GENERATION_ATTEMPTS: usize = 500;

/// Sampling pool used when `ROUTE_BOUNDING_BOXES` is unset: mainland Portugal,
/// as `[min_lat, min_lng, max_lat, max_lng]`.
pub const DEFAULT_BOUNDING_BOXES_JSON: &str = "[[36.96, -9.50, 42.15, -6.19]]";

// --- Land verification (Nominatim) ---

pub const DEFAULT_NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";
/// Nominatim's usage policy requires an identifying User-Agent.
pub const DEFAULT_NOMINATIM_USER_AGENT: &str =
    "landroute/0.1 (random route generator; https://github.com/landroute/landroute)";
pub const DEFAULT_LAND_CHECK_TIMEOUT_MS: u64 = 5_000;

// --- Routing (Valhalla) ---

pub const DEFAULT_VALHALLA_URL: &str = "http://localhost:8002/route";
pub const DEFAULT_ROUTE_FETCH_TIMEOUT_MS: u64 = 10_000;
/// Valhalla encodes shapes with six decimal digits.
pub const DEFAULT_VALHALLA_SHAPE_PRECISION: u32 = 6;
/// Classic Google encoded-polyline precision.
pub const STANDARD_POLYLINE_PRECISION: u32 = 5;
pub const VALHALLA_DISTANCE_UNITS: &str = "kilometers";

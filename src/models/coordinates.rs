use crate::constants::DEFAULT_EARTH_RADIUS_KM;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Result<Self, String> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(format!(
                "Invalid coordinates: ({}, {}) (must be finite numbers)",
                lat, lng
            ));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(format!(
                "Invalid latitude: {} (must be between -90 and 90)",
                lat
            ));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(format!(
                "Invalid longitude: {} (must be between -180 and 180)",
                lng
            ));
        }
        Ok(Coordinates { lat, lng })
    }

    /// True when both components are finite numbers
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Haversine distance in kilometers using the mean Earth radius.
    /// Both values are assumed valid; see `geometry::great_circle_distance`
    /// for the checked form with a configurable radius.
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        self.distance_to_with_radius(other, DEFAULT_EARTH_RADIUS_KM)
    }

    pub fn distance_to_with_radius(&self, other: &Coordinates, earth_radius_km: f64) -> f64 {
        let lat1_rad = self.lat.to_radians();
        let lat2_rad = other.lat.to_radians();
        let delta_lat = (other.lat - self.lat).to_radians();
        let delta_lng = (other.lng - self.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        earth_radius_km * c
    }
}

/// `(lat, lng)` tuple, unchecked
impl From<(f64, f64)> for Coordinates {
    fn from((lat, lng): (f64, f64)) -> Self {
        Coordinates { lat, lng }
    }
}

/// `[lat, lng]` pair, unchecked. Note the order differs from GeoJSON.
impl From<[f64; 2]> for Coordinates {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Coordinates { lat, lng }
    }
}

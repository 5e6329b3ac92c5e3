use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive distance window in kilometers that an accepted route must fall into
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceRange {
    pub min_km: f64,
    pub max_km: f64,
}

impl DistanceRange {
    pub fn new(min_km: f64, max_km: f64) -> Result<Self, String> {
        if !min_km.is_finite() || !max_km.is_finite() {
            return Err("Distance bounds must be finite numbers".to_string());
        }
        if min_km < 0.0 || max_km < 0.0 {
            return Err("Distance bounds cannot be negative".to_string());
        }
        if min_km > max_km {
            return Err(format!(
                "Minimum distance {}km is greater than maximum distance {}km",
                min_km, max_km
            ));
        }
        Ok(DistanceRange { min_km, max_km })
    }

    /// Build a range without validation. An inverted range never accepts
    /// anything, which the generator's attempt cap turns into an error.
    pub fn from_raw(min_km: f64, max_km: f64) -> Self {
        DistanceRange { min_km, max_km }
    }

    pub fn contains(&self, distance_km: f64) -> bool {
        distance_km >= self.min_km && distance_km <= self.max_km
    }
}

impl fmt::Display for DistanceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}-{:.2}km", self.min_km, self.max_km)
    }
}

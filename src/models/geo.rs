use crate::models::Coordinates;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in geographic coordinates.
///
/// Deserializes from either the ordered array form
/// `[min_lat, min_lng, max_lat, max_lng]` or an object with named fields
/// (`min_lat`/`minLat` style keys are both accepted).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoundingBoxRepr")]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lng: f64,
    pub max_lat: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    pub fn new(min_lat: f64, min_lng: f64, max_lat: f64, max_lng: f64) -> Result<Self, String> {
        if ![min_lat, min_lng, max_lat, max_lng]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err("Bounding box bounds must be finite numbers".to_string());
        }
        if min_lat > max_lat {
            return Err(format!(
                "Invalid bounding box: min_lat {} is greater than max_lat {}",
                min_lat, max_lat
            ));
        }
        if min_lng > max_lng {
            return Err(format!(
                "Invalid bounding box: min_lng {} is greater than max_lng {}",
                min_lng, max_lng
            ));
        }
        if min_lat < -90.0 || max_lat > 90.0 {
            return Err(format!(
                "Invalid bounding box: latitude range [{}, {}] exceeds [-90, 90]",
                min_lat, max_lat
            ));
        }
        if min_lng < -180.0 || max_lng > 180.0 {
            return Err(format!(
                "Invalid bounding box: longitude range [{}, {}] exceeds [-180, 180]",
                min_lng, max_lng
            ));
        }

        Ok(BoundingBox {
            min_lat,
            min_lng,
            max_lat,
            max_lng,
        })
    }

    pub fn contains(&self, point: &Coordinates) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.lat)
            && (self.min_lng..=self.max_lng).contains(&point.lng)
    }

    /// Great-circle length of the box diagonal in kilometers.
    /// Upper bound for the distance between any two points sampled inside it.
    pub fn diagonal_km(&self) -> f64 {
        let south_west = Coordinates {
            lat: self.min_lat,
            lng: self.min_lng,
        };
        let north_east = Coordinates {
            lat: self.max_lat,
            lng: self.max_lng,
        };
        south_west.distance_to(&north_east)
    }
}

impl TryFrom<[f64; 4]> for BoundingBox {
    type Error = String;

    fn try_from([min_lat, min_lng, max_lat, max_lng]: [f64; 4]) -> Result<Self, Self::Error> {
        BoundingBox::new(min_lat, min_lng, max_lat, max_lng)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoundingBoxRepr {
    Array([f64; 4]),
    Fields {
        #[serde(alias = "minLat")]
        min_lat: f64,
        #[serde(alias = "minLng")]
        min_lng: f64,
        #[serde(alias = "maxLat")]
        max_lat: f64,
        #[serde(alias = "maxLng")]
        max_lng: f64,
    },
}

impl TryFrom<BoundingBoxRepr> for BoundingBox {
    type Error = String;

    fn try_from(repr: BoundingBoxRepr) -> Result<Self, Self::Error> {
        match repr {
            BoundingBoxRepr::Array(bounds) => BoundingBox::try_from(bounds),
            BoundingBoxRepr::Fields {
                min_lat,
                min_lng,
                max_lat,
                max_lng,
            } => BoundingBox::new(min_lat, min_lng, max_lat, max_lng),
        }
    }
}

use crate::error::{AppError, Result};
use crate::models::{BoundingBox, Coordinates};
use rand::distr::{Distribution, Uniform};
use rand::Rng;

/// Haversine great-circle distance in kilometers on a sphere of the given radius.
///
/// Fails with `InvalidInput` when a component is NaN or infinite, or when
/// the radius is not a positive finite number.
pub fn great_circle_distance(
    from: &Coordinates,
    to: &Coordinates,
    earth_radius_km: f64,
) -> Result<f64> {
    if !from.is_finite() || !to.is_finite() {
        return Err(AppError::InvalidInput(format!(
            "Invalid coordinates for distance: ({}, {}) -> ({}, {})",
            from.lat, from.lng, to.lat, to.lng
        )));
    }
    if !earth_radius_km.is_finite() || earth_radius_km <= 0.0 {
        return Err(AppError::InvalidInput(format!(
            "Invalid Earth radius: {}",
            earth_radius_km
        )));
    }

    Ok(from.distance_to_with_radius(to, earth_radius_km))
}

/// Positional form of `great_circle_distance` for callers holding raw scalars
pub fn haversine_distance(
    lat1: f64,
    lng1: f64,
    lat2: f64,
    lng2: f64,
    earth_radius_km: f64,
) -> Result<f64> {
    great_circle_distance(
        &Coordinates::from((lat1, lng1)),
        &Coordinates::from((lat2, lng2)),
        earth_radius_km,
    )
}

/// Uniform random point inside `bbox`, drawing latitude and longitude independently.
/// Both ranges are inclusive so degenerate boxes yield their single point.
pub fn sample_random_coordinate<R: Rng + ?Sized>(
    bbox: &BoundingBox,
    rng: &mut R,
) -> Result<Coordinates> {
    let lat = Uniform::new_inclusive(bbox.min_lat, bbox.max_lat)
        .map_err(|e| AppError::InvalidInput(format!("Invalid latitude range: {}", e)))?
        .sample(rng);
    let lng = Uniform::new_inclusive(bbox.min_lng, bbox.max_lng)
        .map_err(|e| AppError::InvalidInput(format!("Invalid longitude range: {}", e)))?
        .sample(rng);

    Ok(Coordinates { lat, lng })
}

/// Planar angle in degrees from `from` to `to`, in (-180, 180].
/// Longitude is the x axis, latitude the y axis.
pub fn angle(from: &Coordinates, to: &Coordinates) -> f64 {
    let dx = to.lng - from.lng;
    let dy = to.lat - from.lat;
    dy.atan2(dx).to_degrees()
}

/// Map an angle in [-180, 180] onto [0, 360)
pub fn normalize_angle_360(theta: f64) -> f64 {
    let normalized = if theta < 0.0 { 360.0 + theta } else { theta };
    // tolerate a full turn of input
    if normalized >= 360.0 {
        normalized - 360.0
    } else {
        normalized
    }
}

/// Angle from `from` to `to` in [0, 360)
pub fn bearing(from: &Coordinates, to: &Coordinates) -> f64 {
    normalize_angle_360(angle(from, to))
}

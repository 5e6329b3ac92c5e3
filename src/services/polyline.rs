use crate::constants::{DEFAULT_VALHALLA_SHAPE_PRECISION, STANDARD_POLYLINE_PRECISION};
use crate::error::{AppError, Result};
use crate::models::{Coordinates, Path};

/// Encoded polyline codec (Google algorithm) with configurable precision.
///
/// Precision 5 is the classic format; Valhalla shapes use precision 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolylineCodec {
    precision: u32,
}

impl PolylineCodec {
    pub fn new(precision: u32) -> Result<Self> {
        if !(1..=10).contains(&precision) {
            return Err(AppError::InvalidInput(format!(
                "Polyline precision must be between 1 and 10, got {}",
                precision
            )));
        }
        Ok(PolylineCodec { precision })
    }

    pub fn standard() -> Self {
        PolylineCodec {
            precision: STANDARD_POLYLINE_PRECISION,
        }
    }

    pub fn valhalla() -> Self {
        PolylineCodec {
            precision: DEFAULT_VALHALLA_SHAPE_PRECISION,
        }
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    fn factor(&self) -> f64 {
        10_f64.powi(self.precision as i32)
    }

    /// Decode an encoded polyline into `(lat, lng)` points, in order
    pub fn decode(&self, encoded: &str) -> Result<Path> {
        let factor = self.factor();
        let bytes = encoded.as_bytes();
        let mut index = 0;
        let mut lat: i64 = 0;
        let mut lng: i64 = 0;
        let mut path = Vec::new();

        while index < bytes.len() {
            lat += decode_value(bytes, &mut index)?;
            lng += decode_value(bytes, &mut index)?;

            let point = Coordinates::new(lat as f64 / factor, lng as f64 / factor).map_err(|e| {
                AppError::InvalidInput(format!(
                    "Polyline point {} out of range at precision {}: {}",
                    path.len(),
                    self.precision,
                    e
                ))
            })?;
            path.push(point);
        }

        Ok(path)
    }

    pub fn encode(&self, path: &[Coordinates]) -> String {
        let factor = self.factor();
        let mut encoded = String::new();
        let mut previous_lat: i64 = 0;
        let mut previous_lng: i64 = 0;

        for point in path {
            let lat = (point.lat * factor).round() as i64;
            let lng = (point.lng * factor).round() as i64;
            encode_value(lat - previous_lat, &mut encoded);
            encode_value(lng - previous_lng, &mut encoded);
            previous_lat = lat;
            previous_lng = lng;
        }

        encoded
    }
}

impl Default for PolylineCodec {
    fn default() -> Self {
        Self::valhalla()
    }
}

/// Read one zigzag-encoded delta starting at `index`, advancing it
fn decode_value(bytes: &[u8], index: &mut usize) -> Result<i64> {
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let byte = *bytes.get(*index).ok_or_else(|| {
            AppError::InvalidInput(format!("Polyline truncated at byte {}", *index))
        })?;
        if !(63..=126).contains(&byte) {
            return Err(AppError::InvalidInput(format!(
                "Invalid polyline character {:?} at byte {}",
                byte as char, *index
            )));
        }
        if shift > 60 {
            return Err(AppError::InvalidInput(
                "Polyline value overflows 64 bits".to_string(),
            ));
        }

        let chunk = (byte - 63) as i64;
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        *index += 1;

        if chunk < 0x20 {
            break;
        }
    }

    Ok(if result & 1 != 0 {
        !(result >> 1)
    } else {
        result >> 1
    })
}

fn encode_value(delta: i64, out: &mut String) {
    let mut value = if delta < 0 { !(delta << 1) } else { delta << 1 };
    while value >= 0x20 {
        out.push((((value & 0x1f) | 0x20) as u8 + 63) as char);
        value >>= 5;
    }
    out.push((value as u8 + 63) as char);
}

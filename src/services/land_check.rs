use crate::error::Result;
use crate::models::Coordinates;
use async_trait::async_trait;
use std::time::Duration;

/// Answers whether a point lies on land.
///
/// Implementations report their own failures as `Err`; callers that need an
/// answer regardless go through `classify_point`, which never fails.
#[async_trait]
pub trait LandVerifier: Send + Sync {
    async fn is_on_land(&self, point: &Coordinates) -> Result<bool>;
}

/// Outcome of a land check after the fail-open policy is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandClassification {
    OnLand,
    OffLand,
    /// The verifier failed or timed out; the point is treated as land
    AssumedLand,
}

impl LandClassification {
    pub fn is_land(&self) -> bool {
        !matches!(self, LandClassification::OffLand)
    }
}

/// Classify `point`, degrading any verifier error or timeout to `AssumedLand`
pub async fn classify_point(
    verifier: &dyn LandVerifier,
    point: &Coordinates,
    timeout: Duration,
) -> LandClassification {
    match tokio::time::timeout(timeout, verifier.is_on_land(point)).await {
        Ok(Ok(true)) => LandClassification::OnLand,
        Ok(Ok(false)) => LandClassification::OffLand,
        Ok(Err(e)) => {
            tracing::warn!(
                lat = point.lat,
                lng = point.lng,
                error = %e,
                "Land check failed for ({:.5}, {:.5}), assuming land: {}",
                point.lat, point.lng, e
            );
            LandClassification::AssumedLand
        }
        Err(_) => {
            tracing::warn!(
                lat = point.lat,
                lng = point.lng,
                timeout_ms = timeout.as_millis() as u64,
                "Land check timed out after {}ms for ({:.5}, {:.5}), assuming land",
                timeout.as_millis(), point.lat, point.lng
            );
            LandClassification::AssumedLand
        }
    }
}
